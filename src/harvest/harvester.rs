//! Bounded concurrent harvesting of a page range
//!
//! Every page in the plan's inclusive range is fetched by its own task.
//! Concurrency is capped by a semaphore: a permit is acquired before a page
//! task is spawned and dropped when the task ends, whatever the outcome.
//! Page tasks never touch the result list directly; they send their
//! articles over a channel to a single collector task that owns the list.
//!
//! Shutdown order:
//! 1. every page task is joined
//! 2. the harvester drops its sender, closing the channel
//! 3. the collector drains what is left and returns the list

use crate::config::HarvestConfig;
use crate::harvest::aggregator::{finalize, HarvestResult};
use crate::harvest::traits::PageParser;
use crate::models::Article;
use crate::{ConfigError, HarvestError, Result};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Page range and concurrency for one harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestPlan {
    /// First page to fetch (inclusive)
    pub first_page: u32,

    /// Last page to fetch (inclusive)
    pub last_page: u32,

    /// Maximum number of page tasks running at once
    pub max_concurrent: usize,

    /// Deadline for a single page; `None` waits as long as the parser does
    pub page_timeout: Option<Duration>,
}

impl HarvestPlan {
    /// Creates a plan without a per-page timeout
    pub fn new(first_page: u32, last_page: u32, max_concurrent: usize) -> Self {
        Self {
            first_page,
            last_page,
            max_concurrent,
            page_timeout: None,
        }
    }

    /// Sets the per-page timeout
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }

    /// Builds a plan from the `[harvest]` configuration section
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self {
            first_page: config.first_page,
            last_page: config.last_page,
            max_concurrent: config.max_concurrent as usize,
            page_timeout: config.page_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Checks the plan before any work is scheduled
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The plan can be run
    /// * `Err(ConfigError::Validation)` - Empty/inverted range, page 0, or a
    ///   concurrency limit of zero
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_concurrent < 1 {
            return Err(ConfigError::Validation(
                "max_concurrent must be >= 1".to_string(),
            ));
        }

        if self.first_page < 1 {
            return Err(ConfigError::Validation(
                "first_page must be >= 1".to_string(),
            ));
        }

        if self.last_page < self.first_page {
            return Err(ConfigError::Validation(format!(
                "last_page ({}) must not be before first_page ({})",
                self.last_page, self.first_page
            )));
        }

        Ok(())
    }

    /// The pages covered by this plan
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    /// Number of pages covered by this plan
    pub fn page_count(&self) -> u32 {
        self.last_page.saturating_sub(self.first_page) + 1
    }
}

/// Builds the URL of one listing page
///
/// # Example
///
/// ```
/// use berita_harvester::harvest::page_url;
///
/// assert_eq!(
///     page_url("https://example.com/berita/", 3),
///     "https://example.com/berita/laman/3"
/// );
/// ```
pub fn page_url(base_url: &str, page: u32) -> String {
    format!("{}/laman/{}", base_url.trim_end_matches('/'), page)
}

/// What a single page contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    WithArticles,
    Empty,
    Failed,
}

/// Per-harvest page counters, used for the completion log line
#[derive(Debug, Default)]
struct PageTally {
    with_articles: u32,
    empty: u32,
    failed: u32,
}

impl PageTally {
    fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::WithArticles => self.with_articles += 1,
            PageOutcome::Empty => self.empty += 1,
            PageOutcome::Failed => self.failed += 1,
        }
    }
}

/// Fetches a fixed page range with bounded concurrency
///
/// The permit pool lives as long as the harvester, so tests can check that
/// every permit is back after [`BoundedHarvester::harvest`] returns.
pub struct BoundedHarvester<P> {
    parser: Arc<P>,
    plan: HarvestPlan,
    permits: Arc<Semaphore>,
}

impl<P: PageParser + 'static> BoundedHarvester<P> {
    /// Creates a harvester, rejecting invalid plans
    pub fn new(parser: Arc<P>, plan: HarvestPlan) -> std::result::Result<Self, ConfigError> {
        plan.validate()?;

        Ok(Self {
            parser,
            permits: Arc::new(Semaphore::new(plan.max_concurrent)),
            plan,
        })
    }

    /// The plan this harvester runs
    pub fn plan(&self) -> &HarvestPlan {
        &self.plan
    }

    /// Permits currently free in the pool
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Fetches every page of the plan and returns all articles found
    ///
    /// Articles are returned in arrival order; use [`finalize`] (or
    /// [`BoundedHarvester::run`]) for the date-sorted result. Failed and
    /// empty pages contribute nothing and do not fail the harvest.
    pub async fn harvest(&self, base_url: &str) -> Vec<Article> {
        let start_time = Instant::now();
        tracing::info!(
            "Harvesting pages {}..={} of {} ({} at a time)",
            self.plan.first_page,
            self.plan.last_page,
            base_url,
            self.plan.max_concurrent
        );

        let (sender, mut receiver) = mpsc::channel::<Vec<Article>>(self.plan.max_concurrent);

        let collector = tokio::spawn(async move {
            let mut articles = Vec::new();
            while let Some(page_articles) = receiver.recv().await {
                articles.extend(page_articles);
            }
            articles
        });

        let mut tasks = JoinSet::new();
        for page in self.plan.pages() {
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                tracing::error!("Permit pool closed, not scheduling page {}", page);
                break;
            };

            let parser = Arc::clone(&self.parser);
            let sender = sender.clone();
            let url = page_url(base_url, page);
            let timeout = self.plan.page_timeout;

            tasks.spawn(async move {
                let _permit = permit;

                match parse_with_timeout(parser.as_ref(), &url, timeout).await {
                    Ok(articles) if articles.is_empty() => {
                        tracing::debug!("Page {} has no articles", url);
                        PageOutcome::Empty
                    }
                    Ok(articles) => {
                        let count = articles.len();
                        if sender.send(articles).await.is_err() {
                            tracing::error!("Collector gone, dropping {} articles from {}", count, url);
                            return PageOutcome::Failed;
                        }
                        tracing::debug!("Page {} yielded {} articles", url, count);
                        PageOutcome::WithArticles
                    }
                    Err(e) => {
                        tracing::warn!("Skipping page {}: {}", url, e);
                        PageOutcome::Failed
                    }
                }
            });
        }

        let mut tally = PageTally::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => tally.record(outcome),
                Err(e) => {
                    tracing::error!("Page task aborted: {}", e);
                    tally.record(PageOutcome::Failed);
                }
            }
        }

        // All producers are done; closing the channel lets the collector finish
        drop(sender);

        let articles = match collector.await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Collector task aborted: {}", e);
                Vec::new()
            }
        };

        tracing::info!(
            "Harvest finished in {:?}: {} articles, {} pages with articles, {} empty, {} failed",
            start_time.elapsed(),
            articles.len(),
            tally.with_articles,
            tally.empty,
            tally.failed
        );

        articles
    }

    /// Harvests and sorts in one step
    pub async fn run(&self, base_url: &str) -> HarvestResult {
        finalize(self.harvest(base_url).await)
    }
}

async fn parse_with_timeout<P: PageParser + ?Sized>(
    parser: &P,
    url: &str,
    timeout: Option<Duration>,
) -> Result<Vec<Article>> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, parser.parse_page(url))
            .await
            .map_err(|_| HarvestError::Timeout {
                url: url.to_string(),
            })?,
        None => parser.parse_page(url).await,
    }
}

/// Harvests an inclusive page range with at most `max_concurrent` pages in flight
///
/// # Arguments
///
/// * `base_url` - Listing root; page N is `{base_url}/laman/N`
/// * `first_page` - First page (inclusive, >= 1)
/// * `last_page` - Last page (inclusive, >= `first_page`)
/// * `max_concurrent` - Concurrency ceiling (>= 1)
/// * `parser` - Turns one page into articles
///
/// # Returns
///
/// * `Ok(Vec<Article>)` - Every article found, unsorted
/// * `Err(HarvestError::Config)` - The range or limit is invalid; nothing was fetched
pub async fn harvest<P: PageParser + 'static>(
    base_url: &str,
    first_page: u32,
    last_page: u32,
    max_concurrent: usize,
    parser: Arc<P>,
) -> Result<Vec<Article>> {
    let plan = HarvestPlan::new(first_page, last_page, max_concurrent);
    let harvester = BoundedHarvester::new(parser, plan)?;
    Ok(harvester.harvest(base_url).await)
}
