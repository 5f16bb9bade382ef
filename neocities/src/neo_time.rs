use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

/// RFC 1123 with a numeric zone, e.g. `Sat, 13 Feb 2016 03:04:00 -0000`.
const LAYOUT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// Timestamp as the API writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeoTime(OffsetDateTime);

impl NeoTime {
    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl From<OffsetDateTime> for NeoTime {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

impl From<NeoTime> for OffsetDateTime {
    fn from(value: NeoTime) -> Self {
        value.0
    }
}

impl FromStr for NeoTime {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, LAYOUT).map(Self)
    }
}

impl fmt::Display for NeoTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(LAYOUT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for NeoTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|err| {
            de::Error::custom(format_args!("invalid timestamp '{raw}': {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Month, UtcOffset, Weekday};

    #[test]
    fn parses_numeric_zone() {
        let parsed: NeoTime = "Fri, 21 Apr 2017 18:05:39 -0700".parse().unwrap();
        let inner = parsed.into_inner();
        assert_eq!(inner.year(), 2017);
        assert_eq!(inner.month(), Month::April);
        assert_eq!(inner.day(), 21);
        assert_eq!(inner.weekday(), Weekday::Friday);
        assert_eq!((inner.hour(), inner.minute(), inner.second()), (18, 5, 39));
        assert_eq!(inner.offset(), UtcOffset::from_hms(-7, 0, 0).unwrap());
    }

    #[test]
    fn parses_negative_zero_zone_as_utc() {
        let parsed: NeoTime = "Sat, 13 Feb 2016 03:04:00 -0000".parse().unwrap();
        assert_eq!(parsed.into_inner().offset(), UtcOffset::UTC);
    }

    #[test]
    fn rejects_other_layouts() {
        assert!("2017-04-21T18:05:39Z".parse::<NeoTime>().is_err());
        assert!("Fri, 21 Apr 2017 18:05:39 GMT".parse::<NeoTime>().is_err());
    }

    #[test]
    fn displays_in_the_same_layout() {
        let raw = "Sat, 15 Jun 2024 10:30:00 +0200";
        assert_eq!(raw.parse::<NeoTime>().unwrap().to_string(), raw);
    }

    #[test]
    fn deserializes_from_json_string() {
        let parsed: NeoTime = serde_json::from_str("\"Sat, 13 Feb 2016 03:04:00 -0000\"").unwrap();
        assert_eq!(parsed.into_inner().day(), 13);

        let err = serde_json::from_str::<NeoTime>("\"yesterday\"").unwrap_err();
        assert!(err.to_string().contains("invalid timestamp 'yesterday'"));
    }
}
