//! Scraper facade
//!
//! Acquire a document (fetch + parse), then run one dispatch pass over it.

use gleaner_dom::Document;
use gleaner_html::HtmlParser;
use gleaner_net::{Fetch, HttpFetcher, NetError};

use crate::{dispatch, DispatchStats, NodeWrapper, Registry, ScrapeError, ScraperConfig, Source};

/// Registers selector callbacks and visits documents
pub struct Scraper<'a> {
    config: ScraperConfig,
    fetcher: Option<Box<dyn Fetch + 'a>>,
    registry: Registry<'a>,
    last_url: Option<String>,
    raw_html: String,
}

impl<'a> Scraper<'a> {
    /// Scraper with default configuration. The HTTP client is created on
    /// the first URL visit.
    pub fn new() -> Self {
        Self::with_config(ScraperConfig::default())
    }

    pub fn with_config(config: ScraperConfig) -> Self {
        Self {
            config,
            fetcher: None,
            registry: Registry::new(),
            last_url: None,
            raw_html: String::new(),
        }
    }

    /// Use `fetcher` for URL sources instead of the built-in HTTP client
    pub fn with_fetcher(mut self, fetcher: impl Fetch + 'a) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Register or replace the callback for `selector`
    pub fn on_element(
        &mut self,
        selector: &str,
        callback: impl FnMut(&NodeWrapper<'_>) + 'a,
    ) -> Result<&mut Self, ScrapeError> {
        self.registry.register(selector, callback)?;
        Ok(self)
    }

    /// Acquire `source` and dispatch over it.
    ///
    /// On failure nothing has been dispatched and the registry, last URL
    /// and raw HTML are unchanged.
    pub fn visit(&mut self, source: impl Into<Source>) -> Result<DispatchStats, ScrapeError> {
        let source = source.into();
        tracing::info!("Visiting {}", source.location());

        let (html, document) = match &source {
            Source::Url(url) => {
                let body = self.acquire(url)?;
                let document = self.parser().parse_bytes(&body, url)?;
                (String::from_utf8_lossy(&body).into_owned(), document)
            }
            Source::Html(html) => {
                let document = self.parser().parse_with_url(html, source.location())?;
                (html.clone(), document)
            }
        };

        self.raw_html = html;
        self.last_url = match source {
            Source::Url(url) => Some(url),
            Source::Html(_) => None,
        };
        Ok(self.visit_document(&document))
    }

    /// Dispatch over in-memory markup
    pub fn visit_html(&mut self, html: &str) -> Result<DispatchStats, ScrapeError> {
        self.visit(Source::html(html))
    }

    /// Dispatch over an already parsed document
    pub fn visit_document(&mut self, document: &Document) -> DispatchStats {
        let stats = dispatch(&mut self.registry, document, self.config.max_depth);
        if stats.truncated {
            tracing::warn!(
                "{} is deeper than {} levels; deeper nodes were skipped",
                document.url(),
                self.config.max_depth
            );
        }
        stats
    }

    fn parser(&self) -> HtmlParser {
        HtmlParser::new().strict(self.config.strict_parsing)
    }

    fn acquire(&mut self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let failure = |source: NetError| ScrapeError::AcquisitionFailure {
            url: url.to_string(),
            source,
        };

        let fetcher: Box<dyn Fetch + 'a> = match self.fetcher.take() {
            Some(fetcher) => fetcher,
            None => Box::new(HttpFetcher::with_config(self.config.fetch.clone()).map_err(failure)?),
        };
        let fetcher = self.fetcher.insert(fetcher);

        let response = fetcher.fetch(url).map_err(failure)?;
        if !response.is_success() {
            return Err(failure(NetError::HttpError { status: response.status }));
        }
        Ok(response.body)
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// URL of the last successful URL visit
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Markup of the last successful visit
    pub fn raw_html(&self) -> &str {
        &self.raw_html
    }
}

impl Default for Scraper<'_> {
    fn default() -> Self {
        Self::new()
    }
}
