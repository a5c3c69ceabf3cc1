//! HTTP fetcher
//!
//! Blocking GET over reqwest with a per-attempt timeout and bounded retries.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::{Fetch, FetchConfig, NetError, Response};

/// reqwest-backed [`Fetch`] implementation
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self, NetError> {
        Self::with_config(FetchConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: FetchConfig) -> Result<Self, NetError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// One GET attempt, any status returned as-is
    fn get_once(&self, url: &Url) -> Result<Response, NetError> {
        let response = self.client.get(url.as_str()).send().map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response.headers().iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.bytes().map_err(map_reqwest_error)?.to_vec();

        Ok(Response { status, headers, body })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Response, NetError> {
        let parsed = validate_url(url)?;
        tracing::info!("HTTP GET {}", parsed);

        let response = with_retries(self.config.retries, self.config.retry_backoff, || {
            let response = self.get_once(&parsed)?;
            if response.is_success() {
                Ok(response)
            } else {
                Err(NetError::HttpError { status: response.status })
            }
        })?;

        tracing::debug!("HTTP {} {} ({} bytes)", response.status, parsed, response.body.len());
        Ok(response)
    }
}

/// Only absolute http(s) URLs are fetched
fn validate_url(url: &str) -> Result<Url, NetError> {
    let parsed = Url::parse(url).map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(NetError::InvalidUrl(format!("{url}: unsupported scheme {scheme}"))),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> NetError {
    if err.is_timeout() {
        NetError::Timeout(err.to_string())
    } else {
        NetError::Network(err.to_string())
    }
}

/// Run `attempt` until it succeeds, fails permanently, or `retries` extra
/// attempts are used up. The last error is returned.
pub(crate) fn with_retries<T>(
    retries: u32,
    backoff: Duration,
    mut attempt: impl FnMut() -> Result<T, NetError>,
) -> Result<T, NetError> {
    let mut tries = 0;
    loop {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && tries < retries => {
                tries += 1;
                tracing::warn!("Attempt {} failed: {}; retrying", tries, err);
                thread::sleep(backoff * tries);
            }
            Err(err) => return Err(err),
        }
    }
}
