//! JSON response envelopes
//!
//! Both commands print a status envelope carrying a status code, a message,
//! the elapsed time, and the payload:
//!
//! ```text
//! {"response":"200","message":"success","responseTime":"812 ms",
//!  "data":{"dapo":{"berita":[ ... ]}}}
//! ```

use crate::harvest::HarvestResult;
use crate::models::{Article, ArticleDetail};
use serde::Serialize;
use std::time::Duration;

/// Envelope for a listing harvest
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub response: String,
    pub message: String,
    #[serde(rename = "responseTime")]
    pub response_time: String,
    pub data: ListingData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingData {
    pub dapo: ListingSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingSection {
    pub berita: Vec<Article>,
}

impl ListingResponse {
    /// Wraps a harvest result; `NoData` becomes a 404 envelope
    pub fn from_result(result: HarvestResult, elapsed: Duration) -> Self {
        let (response, message) = if result.is_no_data() {
            ("404", "No data found")
        } else {
            ("200", "success")
        };

        Self {
            response: response.to_string(),
            message: message.to_string(),
            response_time: format_elapsed(elapsed),
            data: ListingData {
                dapo: ListingSection {
                    berita: result.into_articles(),
                },
            },
        }
    }
}

/// Envelope for a single article
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub response: String,
    #[serde(rename = "responseTime")]
    pub response_time: String,
    pub message: String,
    pub data: ArticleDetail,
}

impl ArticleResponse {
    pub fn success(detail: ArticleDetail, elapsed: Duration) -> Self {
        Self {
            response: "200".to_string(),
            response_time: format_elapsed(elapsed),
            message: "Success".to_string(),
            data: detail,
        }
    }
}

/// Formats elapsed time as whole milliseconds, e.g. `"812 ms"`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{} ms", elapsed.as_millis())
}
