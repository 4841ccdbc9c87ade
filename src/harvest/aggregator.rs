//! Final ordering of harvested articles
//!
//! Pure and I/O free: the same input always gives the same output.

use crate::date::DateNormalizer;
use crate::models::Article;
use std::cmp::Reverse;

/// Outcome of a harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestResult {
    /// Articles sorted newest first; never empty
    Found(Vec<Article>),

    /// No page yielded any article
    NoData,
}

impl HarvestResult {
    /// The sorted articles (empty for `NoData`)
    pub fn articles(&self) -> &[Article] {
        match self {
            Self::Found(articles) => articles,
            Self::NoData => &[],
        }
    }

    /// Consumes the result, returning the sorted articles
    pub fn into_articles(self) -> Vec<Article> {
        match self {
            Self::Found(articles) => articles,
            Self::NoData => Vec::new(),
        }
    }

    /// Returns true if nothing was found
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Sorts merged articles newest first
///
/// Articles whose date cannot be read sort after every dated article.
/// The sort is stable, so articles with equal dates (or no date) keep the
/// order they arrived in.
pub fn finalize(articles: Vec<Article>) -> HarvestResult {
    finalize_with(articles, &DateNormalizer::default())
}

/// [`finalize`] with a specific date normalizer
pub fn finalize_with(mut articles: Vec<Article>, normalizer: &DateNormalizer) -> HarvestResult {
    if articles.is_empty() {
        return HarvestResult::NoData;
    }

    // Reverse(None) orders after every Reverse(Some(_))
    articles.sort_by_cached_key(|article| Reverse(normalizer.normalize(&article.date)));

    let undated = articles
        .iter()
        .rev()
        .take_while(|article| normalizer.normalize(&article.date).is_none())
        .count();
    if undated > 0 {
        tracing::debug!(
            "{} of {} articles have an unreadable date and were sorted last",
            undated,
            articles.len()
        );
    }

    HarvestResult::Found(articles)
}
