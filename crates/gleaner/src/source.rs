//! Document sources accepted by [`Scraper::visit`](crate::Scraper::visit)

use url::Url;

/// Where a visit gets its markup from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetched with GET through the scraper's fetcher
    Url(String),
    /// Markup already in memory
    Html(String),
}

impl Source {
    pub fn url(url: impl Into<String>) -> Self {
        Source::Url(url.into())
    }

    pub fn html(html: impl Into<String>) -> Self {
        Source::Html(html.into())
    }

    /// URL recorded on the parsed document
    pub fn location(&self) -> &str {
        match self {
            Source::Url(url) => url,
            Source::Html(_) => "about:blank",
        }
    }
}

/// Plain strings are URLs
impl From<&str> for Source {
    fn from(url: &str) -> Self {
        Source::Url(url.to_string())
    }
}

impl From<String> for Source {
    fn from(url: String) -> Self {
        Source::Url(url)
    }
}

impl From<Url> for Source {
    fn from(url: Url) -> Self {
        Source::Url(url.into())
    }
}

impl From<&Url> for Source {
    fn from(url: &Url) -> Self {
        Source::Url(url.as_str().to_string())
    }
}
