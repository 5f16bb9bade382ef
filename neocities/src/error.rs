use crate::api_client::{Api, ApiClient};
use reqwest::StatusCode;
use serde::Deserialize;
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Error type for every operation in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation needs an API key and the site has none.
    #[error("no key supplied, required for this operation")]
    MissingKey,

    /// A field that the operation depends on was left empty.
    #[error("a required variable is missing: {0}")]
    MissingField(&'static str),

    /// A local file could not be opened or read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The push root could not be walked.
    #[error("failed to walk directory '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The push root lies outside the current directory, so its files have
    /// no relative name to be uploaded under.
    #[error("'{}' is outside the current directory", .path.display())]
    OutsideWorkingDir { path: PathBuf },

    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status other than 200.
    #[error("an error occurred during API call, API: {api}, Code: {status}, Response: {error}")]
    Site {
        api: Api,
        status: StatusCode,
        error: ApiError,
    },

    /// A successful response did not contain the expected JSON.
    #[error("failed to decode {api} response: {source}")]
    Decode {
        api: Api,
        #[source]
        source: serde_json::Error,
    },

    /// An API kind that the service does not expose.
    #[error("unknown API: {0}")]
    UnknownApi(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Whether this error happened before any request left the machine
    /// because the site had no key.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingKey)
    }
}

/// Returned by [`ApiClient::new`] when the site has no key.
///
/// The client is still fully formed and can be recovered with
/// [`MissingKey::into_client`] for calls that do not need authentication.
#[derive(Debug, Error)]
#[error("no key supplied, required for this operation")]
pub struct MissingKey(pub(crate) Box<ApiClient>);

impl MissingKey {
    /// Take back the unauthenticated client.
    pub fn into_client(self) -> ApiClient {
        *self.0
    }
}

impl From<MissingKey> for Error {
    fn from(_: MissingKey) -> Self {
        Self::MissingKey
    }
}

/// Failure payload returned by the API on non-200 responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub result: String,
    pub error_type: String,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ApiError {
    /// Decode an error body.
    ///
    /// Never fails: a body that is not JSON, or that lacks some of the
    /// fields, yields empty strings for whatever could not be read.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
