//! Gleaner Networking
//!
//! Fetches raw document bytes. The engine only sees the [`Fetch`] trait;
//! [`HttpFetcher`] is the reqwest-backed implementation.

mod config;
mod fetcher;

pub use config::{FetchConfig, FetchConfigBuilder};
pub use fetcher::HttpFetcher;

/// Something that turns a URL into a response
pub trait Fetch {
    /// GET `url`. Implementations return `Ok` for any status they received;
    /// callers decide what a non-2xx status means.
    fn fetch(&self, url: &str) -> Result<Response, NetError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<Response, NetError> {
        (**self).fetch(url)
    }
}

impl<F: Fetch + ?Sized> Fetch for Box<F> {
    fn fetch(&self, url: &str) -> Result<Response, NetError> {
        (**self).fetch(url)
    }
}

/// HTTP Response
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// A 200 response carrying `body`
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Check if response is OK (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl NetError {
    /// Whether another attempt could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            NetError::HttpError { status } => *status >= 500,
            NetError::Network(_) | NetError::Timeout(_) => true,
            NetError::InvalidUrl(_) => false,
        }
    }
}
