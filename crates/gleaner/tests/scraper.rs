//! End-to-end tests for gleaner
//!
//! Registration, visits over in-memory and fetched documents, and the
//! node query API used from inside callbacks. No test touches the network.

use std::cell::{Cell, RefCell};

use gleaner::{
    Fetch, NetError, ParseError, Response, ScrapeError, Scraper, ScraperConfig, Selector,
};

const TEMPLATE: &str = r#"<div>
    <p>Links:</p>
    <ul class="main-list">
        <li><a href="foo">Proust</a></li>
        <li class="baz"><a href="http://x/bar/baz">Laure Murat</a></li>
        <li><a href="foo">Last</a></li>
    </ul>
</div>"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serves one page per URL and counts requests
struct StubFetcher {
    pages: Vec<(&'static str, Result<Response, NetError>)>,
    requests: Cell<usize>,
}

impl StubFetcher {
    fn new(pages: Vec<(&'static str, Result<Response, NetError>)>) -> Self {
        Self { pages, requests: Cell::new(0) }
    }
}

impl Fetch for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Response, NetError> {
        self.requests.set(self.requests.get() + 1);
        self.pages.iter()
            .find(|(u, _)| *u == url)
            .map(|(_, r)| r.clone())
            .unwrap_or(Err(NetError::HttpError { status: 404 }))
    }
}

// ============================================================================
// DISPATCH SCENARIOS
// ============================================================================

#[test]
fn test_most_specific_selector_wins() {
    init_tracing();
    let li_count = Cell::new(0);
    let baz_count = Cell::new(0);
    let baz_text = RefCell::new(String::new());

    let mut scraper = Scraper::new();
    scraper
        .on_element("li", |_| li_count.set(li_count.get() + 1))
        .unwrap()
        .on_element("li.baz", |li| {
            baz_count.set(baz_count.get() + 1);
            *baz_text.borrow_mut() = li.text();
        })
        .unwrap();

    scraper.visit_html(TEMPLATE).unwrap();

    assert_eq!(li_count.get(), 2);
    assert_eq!(baz_count.get(), 1);
    assert_eq!(*baz_text.borrow(), "Laure Murat");
}

#[test]
fn test_children_inside_callback() {
    let counts = RefCell::new(Vec::new());
    let html = r#"<ul class="main-list">
        <li>one <ul><li>nested</li><li>nested</li></ul></li>
        <li>two</li>
        <li>three</li>
    </ul>"#;

    let mut scraper = Scraper::new();
    scraper.on_element("ul.main-list", |ul| {
        counts.borrow_mut().push(ul.children("li").len());
    }).unwrap();
    scraper.visit_html(html).unwrap();

    assert_eq!(*counts.borrow(), vec![3]);
}

#[test]
fn test_equal_weight_first_registered_fires() {
    let fired = RefCell::new(Vec::new());
    let mut scraper = Scraper::new();
    scraper.on_element(".a", |_| fired.borrow_mut().push("a")).unwrap();
    scraper.on_element(".b", |_| fired.borrow_mut().push("b")).unwrap();
    scraper.visit_html(r#"<span class="b a">x</span>"#).unwrap();

    assert_eq!(*fired.borrow(), vec!["a"]);
}

#[test]
fn test_root_element_callback() {
    let called = Cell::new(false);
    let mut scraper = Scraper::new();
    scraper.on_element("html", |_| called.set(true)).unwrap();
    scraper.visit_html(TEMPLATE).unwrap();
    assert!(called.get());
}

#[test]
fn test_text_nodes_never_matched() {
    let tags = RefCell::new(Vec::new());
    let mut scraper = Scraper::new();
    scraper.on_element("", |n| tags.borrow_mut().push(n.tag().map(str::to_string))).unwrap();
    scraper.visit_html("<p>text only</p>").unwrap();

    assert!(tags.borrow().iter().all(Option::is_some));
    assert_eq!(tags.borrow().len(), 4); // html, head, body, p
}

#[test]
fn test_revisit_is_idempotent() {
    let li_count = Cell::new(0);
    let baz_count = Cell::new(0);
    let mut scraper = Scraper::new();
    scraper.on_element("li", |_| li_count.set(li_count.get() + 1)).unwrap();
    scraper.on_element("li.baz", |_| baz_count.set(baz_count.get() + 1)).unwrap();

    let first = scraper.visit_html(TEMPLATE).unwrap();
    let after_first = (li_count.get(), baz_count.get());
    let second = scraper.visit_html(TEMPLATE).unwrap();

    assert_eq!(first, second);
    assert_eq!(after_first, (2, 1));
    assert_eq!((li_count.get(), baz_count.get()), (4, 2));
}

#[test]
fn test_reregistration_replaces_callback() {
    let old = Cell::new(0);
    let new = Cell::new(0);
    let mut scraper = Scraper::new();
    scraper.on_element("li", |_| old.set(old.get() + 1)).unwrap();
    scraper.on_element("li", |_| new.set(new.get() + 1)).unwrap();
    scraper.visit_html(TEMPLATE).unwrap();

    assert_eq!(scraper.registry().len(), 1);
    assert_eq!((old.get(), new.get()), (0, 3));
}

// ============================================================================
// QUERIES FROM CALLBACKS
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct Book {
    title: String,
    author: String,
    pub_date: String,
}

const CATALOGUE: &str = r#"<!DOCTYPE html>
<html><head><title>Catalogue</title></head><body>
  <div class="single-book">
    <h3 class="book-title">Le Temps retrouve</h3>
    <span class="author-name">Marcel Proust</span>
    <span class="date-parution">1927</span>
  </div>
  <div class="single-book">
    <h3 class="book-title">Qui a peur de la pornographie ?</h3>
    <span class="author-name">Laure Murat</span>
  </div>
</body></html>"#;

#[test]
fn test_extract_records() {
    let books = RefCell::new(Vec::new());
    let mut scraper = Scraper::new();
    scraper.on_element(".single-book", |nw| {
        books.borrow_mut().push(Book {
            title: nw.find(".book-title").eq(0).text(),
            author: nw.find(".author-name").eq(0).text(),
            pub_date: nw.find(".date-parution").eq(0).text(),
        });
    }).unwrap();
    scraper.visit_html(CATALOGUE).unwrap();

    let books = books.borrow();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0], Book {
        title: "Le Temps retrouve".into(),
        author: "Marcel Proust".into(),
        pub_date: "1927".into(),
    });
    // Missing field: eq(0) on an empty collection yields an empty handle
    assert_eq!(books[1].pub_date, "");
    assert_eq!(books[1].author, "Laure Murat");
}

#[test]
fn test_find_document_order_and_each() {
    let hrefs = RefCell::new(Vec::new());
    let mut scraper = Scraper::new();
    scraper.on_element("ul", |ul| {
        ul.find("a").each(|a| hrefs.borrow_mut().push(a.attr("href").unwrap_or("").to_string()));
    }).unwrap();
    scraper.visit_html(TEMPLATE).unwrap();

    assert_eq!(*hrefs.borrow(), vec!["foo", "http://x/bar/baz", "foo"]);
}

#[test]
fn test_empty_handle_is_inert() {
    let checked = Cell::new(false);
    let mut scraper = Scraper::new();
    scraper.on_element("p", |p| {
        let missing = p.find("li").eq(5);
        assert!(missing.is_empty());
        assert_eq!(missing.text(), "");
        assert!(missing.find("a").is_empty());
        checked.set(true);
    }).unwrap();
    scraper.visit_html(TEMPLATE).unwrap();
    assert!(checked.get());
}

// ============================================================================
// ACQUISITION
// ============================================================================

#[test]
fn test_visit_url_through_fetcher() {
    let fetcher = StubFetcher::new(vec![
        ("https://books.example/new", Ok(Response::ok(CATALOGUE))),
    ]);
    let count = Cell::new(0);

    let mut scraper = Scraper::new().with_fetcher(&fetcher);
    scraper.on_element(".single-book", |_| count.set(count.get() + 1)).unwrap();
    let stats = scraper.visit("https://books.example/new").unwrap();

    assert_eq!(count.get(), 2);
    assert_eq!(stats.matched, 2);
    assert_eq!(fetcher.requests.get(), 1);
    assert_eq!(scraper.last_url(), Some("https://books.example/new"));
    assert!(scraper.raw_html().contains("single-book"));
}

#[test]
fn test_acquisition_failure_keeps_state() {
    let fetcher = StubFetcher::new(vec![
        ("https://ok.example/", Ok(Response::ok(TEMPLATE))),
        ("https://down.example/", Err(NetError::Network("connection refused".into()))),
    ]);
    let count = Cell::new(0);

    let mut scraper = Scraper::new().with_fetcher(&fetcher);
    scraper.on_element("li", |_| count.set(count.get() + 1)).unwrap();
    scraper.visit("https://ok.example/").unwrap();

    let err = scraper.visit("https://down.example/").unwrap_err();
    assert!(matches!(err, ScrapeError::AcquisitionFailure { ref url, .. } if url == "https://down.example/"));
    assert_eq!(scraper.last_url(), Some("https://ok.example/"));
    assert_eq!(scraper.registry().len(), 1);

    let err = scraper.visit("https://missing.example/").unwrap_err();
    assert!(err.to_string().contains("404"));

    scraper.visit("https://ok.example/").unwrap();
    assert_eq!(count.get(), 6);
}

#[test]
fn test_parse_failure_is_recoverable() {
    let config = ScraperConfig { strict_parsing: true, ..Default::default() };
    let count = Cell::new(0);
    let mut scraper = Scraper::with_config(config);
    scraper.on_element("p", |_| count.set(count.get() + 1)).unwrap();

    let err = scraper.visit_html("<p>unclosed <b>bold</p></i>").unwrap_err();
    assert!(matches!(err, ScrapeError::DocumentParseFailure(ParseError::Malformed { .. })));
    assert_eq!(count.get(), 0);
    assert_eq!(scraper.registry().len(), 1);
}

#[test]
fn test_invalid_selector_rejected() {
    let mut scraper = Scraper::new();
    let err = scraper.on_element("div > p", |_| {}).err().unwrap();
    assert!(matches!(err, ScrapeError::InvalidSelectorSyntax(_)));
    assert!(scraper.registry().is_empty());
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_from_partial_json() {
    let config: ScraperConfig = serde_json::from_str(r#"{"max_depth": 3, "strict_parsing": true}"#).unwrap();
    assert_eq!(config.max_depth, 3);
    assert!(config.strict_parsing);
    assert_eq!(config.fetch, ScraperConfig::default().fetch);

    let json = serde_json::to_string(&config).unwrap();
    let back: ScraperConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_depth_limit_from_config() {
    let config = ScraperConfig { max_depth: 4, ..Default::default() };
    let hits = Cell::new(0);
    let mut scraper = Scraper::with_config(config);
    scraper.on_element("li", |_| hits.set(hits.get() + 1)).unwrap();

    // document(0) > html(1) > body(2) > div(3) > ul(4) > li(5)
    let stats = scraper.visit_html("<div><ul><li>deep</li></ul></div>").unwrap();
    assert!(stats.truncated);
    assert_eq!(hits.get(), 0);
}

#[test]
fn test_selectors_listed_by_rank() {
    let mut scraper = Scraper::new();
    for raw in ["li", "div#first", "#test.radv.test", "ul.main-list"] {
        scraper.on_element(raw, |_| {}).unwrap();
    }
    let ranked: Vec<&str> = scraper.registry().selectors().map(Selector::raw).collect();
    assert_eq!(ranked, vec!["#test.radv.test", "div#first", "ul.main-list", "li"]);
}
