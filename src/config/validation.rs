use crate::config::types::{CatalogConfig, Config, OutputConfig, WebdriverConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_webdriver_config(&config.webdriver)?;
    validate_catalog_config(&config.catalog)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates WebDriver configuration
fn validate_webdriver_config(config: &WebdriverConfig) -> ConfigResult<()> {
    validate_http_url("endpoint", &config.endpoint)?;

    if config.page_load_timeout_ms < 500 {
        return Err(ConfigError::Validation(format!(
            "page-load-timeout-ms must be >= 500ms, got {}ms",
            config.page_load_timeout_ms
        )));
    }

    // A settle delay is a grace period, not a substitute for the readiness wait
    if config.settle_delay_ms > 10_000 {
        return Err(ConfigError::Validation(format!(
            "settle-delay-ms must be <= 10000ms, got {}ms",
            config.settle_delay_ms
        )));
    }

    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> ConfigResult<()> {
    validate_http_url("start-url", &config.start_url)
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must be an http(s) URL, got scheme '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}
