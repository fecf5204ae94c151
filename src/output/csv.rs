//! CSV export of a finished result set
//!
//! Matches the download format consumers of the dataset expect:
//! semicolon-separated fields, UTF-8 with a leading BOM so spreadsheet
//! tools pick the encoding up, one header row, records in crawl order.

use crate::dataset::{BookRecord, ResultSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Field separator used for export
pub const SEPARATOR: char = ';';

const BOM: &str = "\u{feff}";

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes a single CSV row to any writer
fn write_row<W: Write, F: AsRef<str>>(mut w: W, row: &[F], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Renders the result set as one CSV document
pub fn to_csv_string(set: &ResultSet) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    write!(buf, "{}", BOM).unwrap();
    write_row(&mut buf, &BookRecord::COLUMNS, SEPARATOR).unwrap();
    for record in set.iter() {
        write_row(&mut buf, &record.as_row(), SEPARATOR).unwrap();
    }
    String::from_utf8(buf).expect("csv output is valid utf-8")
}

/// Writes the result set to `path` as CSV
pub fn export_csv(set: &ResultSet, path: &Path) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(to_csv_string(set).as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn record(title: &str, url: &str) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            upc: "u1".to_string(),
            product_type: "Books".to_string(),
            price_excl_tax: "£51.77".to_string(),
            price_incl_tax: "£51.77".to_string(),
            tax: "£0.00".to_string(),
            availability: "In stock (22 available)".to_string(),
            review_count: "0".to_string(),
            rating: "Three".to_string(),
            source_url: url.to_string(),
        }
    }

    fn single_record_set(title: &str) -> ResultSet {
        let mut dataset = Dataset::new();
        dataset.append(record(title, "http://example.com/1"));
        dataset.finalize()
    }

    #[test]
    fn test_starts_with_bom_and_header() {
        let csv = to_csv_string(&single_record_set("Plain"));
        assert!(csv.starts_with('\u{feff}'));
        let header = csv.trim_start_matches('\u{feff}').lines().next().unwrap();
        assert_eq!(
            header,
            "Title;UPC;Product Type;Price (excl. tax);Price (incl. tax);Tax;Availability;Number of reviews;Rating;URL"
        );
    }

    #[test]
    fn test_one_line_per_record_in_order() {
        let mut dataset = Dataset::new();
        dataset.append(record("First", "http://example.com/1"));
        dataset.append(record("Second", "http://example.com/2"));
        let csv = to_csv_string(&dataset.finalize());

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("First;"));
        assert!(lines[2].starts_with("Second;"));
    }

    #[test]
    fn test_separator_in_field_is_quoted() {
        let csv = to_csv_string(&single_record_set("One; or another"));
        assert!(csv.contains("\"One; or another\";u1"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = to_csv_string(&single_record_set(r#"The "Best" Book"#));
        assert!(csv.contains(r#""The ""Best"" Book""#));
    }

    #[test]
    fn test_empty_set_exports_header_only() {
        let csv = to_csv_string(&Dataset::new().finalize());
        assert_eq!(csv.trim_start_matches('\u{feff}').lines().count(), 1);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.csv");
        export_csv(&single_record_set("On disk"), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("On disk;u1"));
    }
}
