//! Output module for exporting a finished result set
//!
//! The crawl core hands over an immutable result set; this layer only
//! serializes it. Projection (title filtering) lives on the result set
//! itself.

mod csv;

pub use csv::{export_csv, to_csv_string, SEPARATOR};
