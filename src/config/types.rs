use serde::Deserialize;

/// Main configuration structure for the harvester
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the values used for the Dapodik news listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub harvest: HarvestConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
}

/// Where the listing lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Listing root; page N is fetched from `{base-url}/laman/{N}`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Origin that relative links and images are resolved against
    pub origin: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dapo.kemdikbud.go.id/berita".to_string(),
            origin: "https://dapo.kemdikbud.go.id".to_string(),
        }
    }
}

/// Page range and concurrency for one harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// First page to fetch (inclusive)
    #[serde(rename = "first-page")]
    pub first_page: u32,

    /// Last page to fetch (inclusive)
    #[serde(rename = "last-page")]
    pub last_page: u32,

    /// Maximum number of pages fetched at the same time
    #[serde(rename = "max-concurrent")]
    pub max_concurrent: u32,

    /// Optional per-page deadline (milliseconds)
    #[serde(rename = "page-timeout-ms")]
    pub page_timeout_ms: Option<u64>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            first_page: 1,
            last_page: 50,
            max_concurrent: 50,
            page_timeout_ms: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the harvester
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "BeritaHarvester".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// CSS selectors used to pull fields out of a listing page
///
/// `item` selects one element per article; every other selector is applied
/// inside that element.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub item: String,
    pub title: String,
    pub date: String,
    pub tags: String,
    pub user: String,
    pub link: String,
    pub image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: ".card-body.card-padding-lg .media".to_string(),
            title: "h3.media-heading".to_string(),
            date: "ul.list-inline li:nth-child(3) span".to_string(),
            tags: "ul.list-inline li:nth-child(5) span".to_string(),
            user: "ul.list-inline li:nth-child(1) span".to_string(),
            link: "a.pull-left".to_string(),
            image: "img".to_string(),
        }
    }
}
