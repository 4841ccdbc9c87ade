//! Records produced by the listing and article scrapers

use serde::{Deserialize, Serialize};

/// One article entry from a listing page
///
/// `link` and `image` are always absolute by the time a record leaves the
/// page parser. `date` is kept exactly as it appeared on the page; sorting
/// goes through [`crate::date::normalize_date`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,

    /// Raw publication date text, e.g. "5 Januari 2024"
    pub date: String,

    pub link: String,

    /// Absolute image URL, or empty when the item has no image
    pub image: String,

    /// Posting user
    pub user: String,

    /// Tags as rendered on the page (possibly several in one string)
    pub tags: String,
}

/// Full content of a single article page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub title: String,
    pub author: String,
    pub date: String,
    pub content: String,
    pub category: String,
}
