use crate::{
    Site,
    error::{ApiError, Error, MissingKey},
};
use reqwest::{
    Method, StatusCode,
    blocking::{Body, Client, Request, RequestBuilder, Response},
    header::{self, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt, str::FromStr};
use tracing::{debug, trace, warn};
use url::Url;

/// Host that serves the NeoCities API.
pub const DEFAULT_API_URL: &str = "https://neocities.org";

/// A NeoCities API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Upload,
    Delete,
    List,
    Info,
}

impl Api {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Info => "info",
        }
    }

    /// HTTP method the endpoint expects.
    pub fn method(self) -> Method {
        match self {
            Self::Upload | Self::Delete => Method::POST,
            Self::List | Self::Info => Method::GET,
        }
    }

    /// Whether the endpoint rejects calls without an API key.
    pub const fn requires_key(self) -> bool {
        !matches!(self, Self::Info)
    }

    /// Path of the endpoint relative to the API host.
    pub fn path(self) -> String {
        format!("api/{}", self.as_str())
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Api {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Self::Upload),
            "delete" => Ok(Self::Delete),
            "list" => Ok(Self::List),
            "info" => Ok(Self::Info),
            other => Err(Error::UnknownApi(other.to_owned())),
        }
    }
}

/// Base configuration for talking to one API endpoint on behalf of a site.
///
/// The client itself never changes between calls. Anything specific to a
/// single call (query parameters, body, content type) is set on the
/// [`ApiRequest`] returned by [`ApiClient::new_request`] or
/// [`ApiClient::request_for`], so one client can be shared across a batch
/// of operations.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api: Api,
    base_url: Url,
    inner_client: Client,
    headers: HeaderMap,
}

impl ApiClient {
    /// Create a client for `api` using the credentials of `site`.
    ///
    /// When the site has no usable key the error still carries a fully
    /// formed, unauthenticated client (see [`MissingKey::into_client`]).
    pub fn new(site: &Site, api: Api) -> Result<Self, MissingKey> {
        let mut client = Self {
            api,
            base_url: Url::parse(DEFAULT_API_URL).expect("default api url should parse"),
            inner_client: Client::builder()
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
                .build()
                .expect("api inner client should build"),
            headers: HeaderMap::new(),
        };

        let Some(key) = site.key.as_ref().map(|key| key.expose_secret()) else {
            return Err(MissingKey(Box::new(client)));
        };
        if key.is_empty() {
            return Err(MissingKey(Box::new(client)));
        }
        match HeaderValue::from_str(&format!("Bearer {key}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                client.headers.insert(header::AUTHORIZATION, value);
                Ok(client)
            }
            Err(_) => {
                warn!("site key contains characters that cannot be sent in a header");
                Err(MissingKey(Box::new(client)))
            }
        }
    }

    /// Send requests to another host, e.g. a staging server.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Replace the underlying HTTP client.
    pub fn with_http_client(mut self, inner_client: Client) -> Self {
        self.inner_client = inner_client;
        self
    }

    /// Point the client at a different endpoint, keeping its headers.
    pub fn change_api(&mut self, api: Api) -> &mut Self {
        self.api = api;
        self
    }

    pub fn api(&self) -> Api {
        self.api
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers copied onto every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_authenticated(&self) -> bool {
        self.headers.contains_key(header::AUTHORIZATION)
    }

    /// Full URL of `api` on the configured host.
    pub fn endpoint(&self, api: Api) -> Result<Url, Error> {
        Ok(self.base_url.join(&api.path())?)
    }

    /// Start a request against the endpoint this client is bound to.
    pub fn new_request(&self) -> Result<ApiRequest, Error> {
        self.request_for(self.api)
    }

    /// Start a request against `api`, regardless of the bound endpoint.
    pub fn request_for(&self, api: Api) -> Result<ApiRequest, Error> {
        let url = self.endpoint(api)?;
        trace!("building {} request for {url}", api.method());
        Ok(ApiRequest {
            api,
            inner: self
                .inner_client
                .request(api.method(), url)
                .headers(self.headers.clone()),
        })
    }
}

/// A single call to the API, derived from an [`ApiClient`].
#[must_use]
#[derive(Debug)]
pub struct ApiRequest {
    api: Api,
    inner: RequestBuilder,
}

impl ApiRequest {
    pub fn api(&self) -> Api {
        self.api
    }

    /// Append query parameters to this request only.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        self.inner = self.inner.query(query);
        self
    }

    pub fn content_type(mut self, value: &str) -> Self {
        self.inner = self.inner.header(header::CONTENT_TYPE, value);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.inner = self.inner.body(body);
        self
    }

    /// Send `form` as an `application/x-www-form-urlencoded` body.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        self.inner = self.inner.form(form);
        self
    }

    /// Build the request without sending it.
    pub fn build(self) -> Result<Request, Error> {
        Ok(self.inner.build()?)
    }

    /// Send the request, turning any status other than 200 into
    /// [`Error::Site`].
    pub fn send(self) -> Result<Response, Error> {
        let api = self.api;
        let res = self.inner.send()?;
        debug!("{api} request returned {}", res.status());

        if res.status() != StatusCode::OK {
            let status = res.status();
            let body = res.bytes().unwrap_or_default();
            return Err(Error::Site {
                api,
                status,
                error: ApiError::from_body(&body),
            });
        }
        Ok(res)
    }

    /// Send the request and decode a successful body as JSON.
    pub fn send_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let api = self.api;
        let body = self.send()?.bytes()?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode { api, source })
    }
}
