//! Crawler module: the crawl-and-extract engine
//!
//! This module contains the core traversal logic:
//! - Listing page cursor: link enumeration and pagination
//! - Item extractor: fixed-schema field reads with per-item fail-fast
//! - Crawl controller: the overall listing/item/done loop
//!
//! Everything runs sequentially over one exclusively-owned navigation
//! session; item order in the output is exactly the left-to-right,
//! page-by-page order of the source listing.

mod controller;
mod cursor;
mod extractor;

pub use controller::crawl;
pub use cursor::{ListingCursor, PageAdvance, ITEM_LINKS, NEXT_CONTROL};
pub use extractor::{extract, labeled_cell, ExtractionError, FIELD_LABELS, RATING_MARKER, TITLE};
