//! Item extractor
//!
//! Reads the fixed ten-field schema off a rendered item detail page. Each
//! field has its own locator: the page heading for the title, labeled
//! product-information table cells addressed by their header text, and a
//! styled rating marker whose second class token carries the rating label.
//!
//! Extraction is fail-fast per item: if any single field cannot be located
//! the whole record is abandoned, never emitted partially.

use crate::dataset::BookRecord;
use crate::session::{NavigationSession, SessionError, Target};
use thiserror::Error;

/// CSS selector for the item title heading
pub const TITLE: &str = "h1";

/// CSS selector for the styled rating marker
pub const RATING_MARKER: &str = "p.star-rating";

/// Header texts of the labeled product-information table rows, in schema
/// order
pub const FIELD_LABELS: [&str; 7] = [
    "UPC",
    "Product Type",
    "Price (excl. tax)",
    "Price (incl. tax)",
    "Tax",
    "Availability",
    "Number of reviews",
];

/// A per-item extraction failure
///
/// Not persisted anywhere: the controller logs it and the item simply does
/// not appear in the result set.
#[derive(Debug, Error)]
#[error("failed to extract item at {url}: {cause}")]
pub struct ExtractionError {
    pub url: String,
    pub cause: SessionError,
}

impl ExtractionError {
    /// Whether skipping this one item is enough, or the whole crawl must
    /// abort (browser gone, page never loaded)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.cause, SessionError::ElementNotFound { .. })
    }
}

/// Locator for the table cell whose row header text contains `label`
pub fn labeled_cell(label: &str) -> Target {
    Target::xpath(format!(
        r#"//th[contains(text(), "{}")]/following-sibling::td"#,
        label
    ))
}

/// Extracts one [`BookRecord`] from the item detail page the session is
/// currently positioned on
///
/// `url` is the detail page address, captured into the record and used to
/// attribute failures.
pub async fn extract<S: NavigationSession + Send>(
    session: &mut S,
    url: &str,
) -> Result<BookRecord, ExtractionError> {
    let fail = |cause: SessionError| ExtractionError {
        url: url.to_string(),
        cause,
    };

    let title = session.read_text(&Target::css(TITLE)).await.map_err(fail)?;
    let upc = labeled_text(session, url, "UPC").await?;
    let product_type = labeled_text(session, url, "Product Type").await?;
    let price_excl_tax = labeled_text(session, url, "Price (excl. tax)").await?;
    let price_incl_tax = labeled_text(session, url, "Price (incl. tax)").await?;
    let tax = labeled_text(session, url, "Tax").await?;
    let availability = labeled_text(session, url, "Availability").await?;
    let review_count = labeled_text(session, url, "Number of reviews").await?;
    let rating = rating_label(session, url).await?;

    Ok(BookRecord {
        title,
        upc,
        product_type,
        price_excl_tax,
        price_incl_tax,
        tax,
        availability,
        review_count,
        rating,
        source_url: url.to_string(),
    })
}

/// Reads one labeled product-information cell
async fn labeled_text<S: NavigationSession + Send>(
    session: &mut S,
    url: &str,
    label: &str,
) -> Result<String, ExtractionError> {
    session
        .read_text(&labeled_cell(label))
        .await
        .map_err(|cause| ExtractionError {
            url: url.to_string(),
            cause,
        })
}

/// Reads the rating label from the marker's second class token
async fn rating_label<S: NavigationSession + Send>(
    session: &mut S,
    url: &str,
) -> Result<String, ExtractionError> {
    let class = session
        .read_attr(&Target::css(RATING_MARKER), "class")
        .await
        .map_err(|cause| ExtractionError {
            url: url.to_string(),
            cause,
        })?;

    class
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| ExtractionError {
            url: url.to_string(),
            cause: SessionError::ElementNotFound {
                locator: format!("css `{}` [class] rating token", RATING_MARKER),
            },
        })
}
