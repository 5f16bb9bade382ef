use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use neocities::{Api, ApiClient, DEFAULT_API_URL, MissingKey, Site, read_key_file};
use std::path::PathBuf;
use url::Url;

/// Options describing which site to act on and how to reach the API.
#[derive(Args)]
pub struct SiteArgs {
    /// API key of your NeoCities site.
    #[clap(
        long = "key",
        env = "NEOCITIES_KEY",
        global = true,
        hide_env_values = true,
        conflicts_with = "keyfile"
    )]
    key: Option<String>,

    /// File containing the API key of your NeoCities site.
    #[clap(
        long = "keyfile",
        env = "NEOCITIES_KEYFILE",
        global = true,
        value_hint = ValueHint::FilePath
    )]
    keyfile: Option<PathBuf>,

    /// URL (including scheme) of the NeoCities API host.
    #[clap(
        long = "api-url",
        env = "NEOCITIES_API_URL",
        global = true,
        default_value = DEFAULT_API_URL,
        value_hint = ValueHint::Url
    )]
    api_url: Url,
}

impl SiteArgs {
    /// Build a [`Site`] holding whichever key was supplied.
    pub fn site(&self) -> Result<Site> {
        let mut site = Site::default();
        if let Some(keyfile) = &self.keyfile {
            site.key = Some(read_key_file(keyfile).context("keyfile read returned error")?);
        } else if let Some(key) = &self.key {
            site = site.with_key(key.as_str());
        }
        Ok(site)
    }

    /// Client for an endpoint that needs the site's key.
    pub fn client(&self, site: &Site, api: Api) -> Result<ApiClient> {
        let client = ApiClient::new(site, api)
            .context("an API key is required - pass --key or --keyfile")?;
        Ok(client.with_base_url(self.api_url.clone()))
    }

    /// Client that sends the key if there is one, and goes without otherwise.
    pub fn optional_client(&self, site: &Site, api: Api) -> ApiClient {
        ApiClient::new(site, api)
            .unwrap_or_else(MissingKey::into_client)
            .with_base_url(self.api_url.clone())
    }
}
