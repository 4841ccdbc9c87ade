//! HTML listing parser
//!
//! This module extracts article records from a listing page. Each article
//! is one element matched by the item selector; its fields are read from
//! child elements:
//! - text fields take the text of every matching child, concatenated and
//!   trimmed
//! - `link` and `image` take the attribute of the first matching child and
//!   are resolved against the site origin

use crate::config::{Config, SelectorConfig};
use crate::harvest::fetcher::{build_http_client, fetch_page};
use crate::harvest::traits::PageParser;
use crate::models::Article;
use crate::{ConfigError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Compiled selectors for one listing layout
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    item: Selector,
    title: Selector,
    date: Selector,
    tags: Selector,
    user: Selector,
    link: Selector,
    image: Selector,
}

impl ListingSelectors {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ListingSelectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            item: compile_selector("item", &config.item)?,
            title: compile_selector("title", &config.title)?,
            date: compile_selector("date", &config.date)?,
            tags: compile_selector("tags", &config.tags)?,
            user: compile_selector("user", &config.user)?,
            link: compile_selector("link", &config.link)?,
            image: compile_selector("image", &config.image)?,
        })
    }
}

fn compile_selector(field: &str, value: &str) -> std::result::Result<Selector, ConfigError> {
    Selector::parse(value)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} '{}': {:?}", field, value, e)))
}

/// Extracts all articles from a listing page
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `origin` - Base for resolving relative `href`/`src` values
/// * `selectors` - The compiled listing selectors
///
/// # Returns
///
/// The articles in document order; empty if the page lists none.
///
/// # Example
///
/// ```
/// use berita_harvester::config::SelectorConfig;
/// use berita_harvester::harvest::{extract_articles, ListingSelectors};
/// use url::Url;
///
/// let html = r#"<div class="card-body card-padding-lg"><div class="media">
///     <a class="pull-left" href="/berita/1"><img src="/img/1.png"></a>
///     <h3 class="media-heading">Judul</h3>
/// </div></div>"#;
/// let selectors = ListingSelectors::compile(&SelectorConfig::default()).unwrap();
/// let origin = Url::parse("https://example.com").unwrap();
/// let articles = extract_articles(html, &origin, &selectors);
/// assert_eq!(articles[0].link, "https://example.com/berita/1");
/// ```
pub fn extract_articles(html: &str, origin: &Url, selectors: &ListingSelectors) -> Vec<Article> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.item)
        .map(|item| Article {
            title: child_text(&item, &selectors.title),
            date: child_text(&item, &selectors.date),
            link: resolve(&child_attr(&item, &selectors.link, "href"), origin),
            image: resolve(&child_attr(&item, &selectors.image, "src"), origin),
            user: child_text(&item, &selectors.user),
            tags: child_text(&item, &selectors.tags),
        })
        .collect()
}

/// Text of every matching child, concatenated and trimmed
fn child_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Attribute of the first matching child, or empty
fn child_attr(element: &ElementRef, selector: &Selector, attr: &str) -> String {
    element
        .select(selector)
        .next()
        .and_then(|child| child.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Resolves an href/src against the origin
///
/// Empty values stay empty. Values that cannot be resolved are dropped
/// rather than kept relative.
fn resolve(value: &str, origin: &Url) -> String {
    if value.is_empty() {
        return String::new();
    }

    match origin.join(value) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::debug!("Dropping unresolvable URL {:?}: {}", value, e);
            String::new()
        }
    }
}

/// [`PageParser`] that fetches listing pages over HTTP and parses their markup
pub struct HtmlListingParser {
    client: Client,
    origin: Url,
    selectors: ListingSelectors,
}

impl HtmlListingParser {
    /// Creates a parser from its parts
    pub fn new(client: Client, origin: Url, selectors: ListingSelectors) -> Self {
        Self {
            client,
            origin,
            selectors,
        }
    }

    /// Creates a parser from configuration, building its own HTTP client
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let origin = Url::parse(&config.source.origin)?;
        let selectors = ListingSelectors::compile(&config.selectors)?;
        Ok(Self::new(client, origin, selectors))
    }
}

#[async_trait]
impl PageParser for HtmlListingParser {
    async fn parse_page(&self, page_url: &str) -> Result<Vec<Article>> {
        let body = fetch_page(&self.client, page_url).await?;
        let articles = extract_articles(&body, &self.origin, &self.selectors);
        tracing::debug!("Parsed {} articles from {}", articles.len(), page_url);
        Ok(articles)
    }
}
