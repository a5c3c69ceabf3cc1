//! Scraper Configuration

use gleaner_dom::DEFAULT_MAX_DEPTH;
use gleaner_net::FetchConfig;
use serde::{Deserialize, Serialize};

/// Scraper configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// HTTP settings for URL sources
    pub fetch: FetchConfig,

    /// Deepest level the walk and node queries descend to
    pub max_depth: usize,

    /// Fail visits on documents the HTML parser had to repair
    pub strict_parsing: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            strict_parsing: false,
        }
    }
}
