//! Harvest module: concurrent fetching of a paginated listing
//!
//! This module contains the core harvesting logic:
//! - HTTP fetching
//! - Listing page parsing (the [`PageParser`] seam and its HTML implementation)
//! - Bounded-concurrency scheduling of a fixed page range
//! - Merging and date ordering of the results

mod aggregator;
mod fetcher;
mod harvester;
mod listing;
mod traits;

pub use aggregator::{finalize, finalize_with, HarvestResult};
pub use fetcher::{build_http_client, fetch_page, user_agent_string};
pub use harvester::{harvest, page_url, BoundedHarvester, HarvestPlan};
pub use listing::{extract_articles, HtmlListingParser, ListingSelectors};
pub use traits::PageParser;

use crate::config::Config;
use crate::Result;
use std::sync::Arc;

/// Runs a complete harvest as described by the configuration
///
/// This is the main entry point. It will:
/// 1. Build the HTTP listing parser
/// 2. Validate the page plan
/// 3. Fetch every page with bounded concurrency
/// 4. Sort the merged articles newest first
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(HarvestResult)` - Harvest completed (possibly with no data)
/// * `Err(HarvestError)` - The configuration could not be turned into a harvest
pub async fn run_harvest(config: &Config) -> Result<HarvestResult> {
    let parser = Arc::new(HtmlListingParser::from_config(config)?);
    let plan = HarvestPlan::from_config(&config.harvest);
    let harvester = BoundedHarvester::new(parser, plan)?;
    Ok(harvester.run(&config.source.base_url).await)
}
