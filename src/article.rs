//! Article fetch and document navigation.
//!
//! Thin glue around the HTTP client and the HTML parser: fetches one
//! encyclopedia page, lifts the geography infobox into plain label/value
//! [`Row`]s, and exposes the raw coordinate tokens. No extraction logic
//! lives here.

use crate::infobox::Row;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

pub const ARTICLE_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

const USER_AGENT: &str = "citypedia/0.2 (city infobox extractor)";

/// Document fetch errors. Both variants are fatal for the invocation;
/// there are no retries.
#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Status(u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Article fetch failed with HTTP {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

/// Fetch the article page for a city name, URL-escaped.
pub fn fetch_article(title: &str) -> Result<String, FetchError> {
    let url = format!("{}{}", ARTICLE_BASE_URL, url_escape(title));
    tracing::debug!(%url, "fetching article");

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            other => FetchError::Network(other.to_string()),
        })?;

    response
        .into_string()
        .map_err(|e| FetchError::Network(e.to_string()))
}

/// A parsed article page. Wraps the document tree and knows just enough
/// querying to serve the extractor: find-by-class, rows-of-table, text.
pub struct ArticlePage {
    document: Html,
}

impl ArticlePage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Rows of the geography infobox, top to bottom. Empty when the page
    /// carries no such table at all.
    pub fn infobox_rows(&self) -> Vec<Row> {
        let table = Selector::parse("table.infobox.geography.vcard").unwrap();
        let tr = Selector::parse("tr").unwrap();
        let th = Selector::parse("th").unwrap();
        let td = Selector::parse("td").unwrap();

        let infobox = match self.document.select(&table).next() {
            Some(el) => el,
            None => return Vec::new(),
        };

        infobox
            .select(&tr)
            .map(|row| Row {
                header: row.select(&th).next().map(element_text),
                data: row.select(&td).next().map(element_text),
            })
            .collect()
    }

    /// Raw latitude/longitude tokens from the page's coordinate markup,
    /// spaces removed. Either may be absent.
    pub fn coordinate_tokens(&self) -> (Option<String>, Option<String>) {
        (self.class_text("latitude"), self.class_text("longitude"))
    }

    fn class_text(&self, class: &str) -> Option<String> {
        let selector = Selector::parse(&format!(".{}", class)).unwrap();
        self.document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().split_whitespace().collect())
    }
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Minimal percent-escaper for article titles.
fn url_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') => c.to_string(),
            _ => c
                .to_string()
                .bytes()
                .map(|b| format!("%{:02X}", b))
                .collect(),
        })
        .collect()
}
