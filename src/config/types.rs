use serde::Deserialize;

/// Default catalog root crawled when no start URL is supplied
pub const DEFAULT_START_URL: &str = "http://books.toscrape.com/";

/// Main configuration structure for bookstall
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub webdriver: WebdriverConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// WebDriver session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebdriverConfig {
    /// Address of a running WebDriver server (geckodriver/chromedriver)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound on waiting for a page to become ready (milliseconds)
    #[serde(rename = "page-load-timeout-ms", default = "default_page_load_timeout")]
    pub page_load_timeout_ms: u64,

    /// Fixed grace period after every navigation (milliseconds, may be 0)
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

/// Catalog traversal configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// First listing page to open
    #[serde(rename = "start-url", default = "default_start_url")]
    pub start_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path the CSV export is written to
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

fn default_endpoint() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_load_timeout() -> u64 {
    10_000
}

fn default_settle_delay() -> u64 {
    250
}

fn default_start_url() -> String {
    DEFAULT_START_URL.to_string()
}

fn default_csv_path() -> String {
    "./books.csv".to_string()
}

impl Default for WebdriverConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_load_timeout_ms: default_page_load_timeout(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}
