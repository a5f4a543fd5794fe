//! Range transport backed by `reqwest`.

use std::time::Duration;

use tracing::debug;

use crate::digest::Prefix;
use crate::error::{Error, Result};
use crate::transport::{ADD_PADDING_HEADER, RangeResponse, RangeTransport};

/// Public Pwned Passwords API.
pub const DEFAULT_BASE_URL: &str = "https://api.pwnedpasswords.com";

/// Environment variable overriding the API base address.
pub const BASE_URL_ENV: &str = "HIBP_API_BASE_URL";

/// User-Agent sent with every request. The API rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("hibp-range-client/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends range requests with a shared `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Transport for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Wraps a caller-configured client. The client is responsible for sending
    /// a User-Agent.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self { client, base_url: normalize_base_url(base_url)? })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn range_url(&self, prefix: &Prefix) -> String {
        format!("{}/range/{}", self.base_url, prefix)
    }
}

impl RangeTransport for HttpTransport {
    async fn fetch_range(&self, prefix: &Prefix, add_padding: bool) -> Result<RangeResponse> {
        let prefix = *prefix;
        let mut request = self.client.get(self.range_url(&prefix));
        if add_padding {
            request = request.header(ADD_PADDING_HEADER, "true");
        }

        let response = request.send().await.map_err(|e| request_error(prefix, e))?;
        let status = response.status().as_u16();
        if response.status() != reqwest::StatusCode::OK {
            debug!(%prefix, status, "range request returned unexpected status");
            return Ok(RangeResponse { status, body: String::new() });
        }

        let body = response.text().await.map_err(|e| request_error(prefix, e))?;
        Ok(RangeResponse { status, body })
    }
}

fn request_error(prefix: Prefix, source: reqwest::Error) -> Error {
    if source.is_timeout() {
        Error::Timeout { prefix }
    } else {
        Error::HttpRequest { prefix, source }
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| {
        Error::InvalidConfiguration(format!("invalid base URL {base_url:?}: {e}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(Error::InvalidConfiguration(format!(
            "base URL {base_url:?} has unsupported scheme {scheme:?}"
        ))),
    }
}

/// Configures an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl HttpTransportBuilder {
    /// Starts from defaults, taking the base address from `HIBP_API_BASE_URL`
    /// when it is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let builder = Self::default();
        match lookup(BASE_URL_ENV) {
            Some(base_url) => builder.base_url(base_url),
            None => builder,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Total time allowed for one request, including reading the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let base_url = normalize_base_url(&self.base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| Error::InvalidConfiguration(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpTransport { client, base_url })
    }
}
