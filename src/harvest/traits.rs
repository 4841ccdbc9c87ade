//! Page parser trait
//!
//! The harvester only knows how to schedule pages; turning one page into
//! articles is delegated to a [`PageParser`].

use crate::models::Article;
use crate::Result;
use async_trait::async_trait;

/// Turns one listing page into the articles it shows
///
/// Implementations must report failures through the returned `Result`
/// rather than panicking, and must not rely on shared mutable state. An
/// empty vector is a normal outcome (the page lists nothing).
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Fetches and parses the page at `page_url`
    ///
    /// Returned articles have absolute `link` and `image` URLs, in the order
    /// they appear on the page.
    async fn parse_page(&self, page_url: &str) -> Result<Vec<Article>>;
}
