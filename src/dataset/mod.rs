//! Scraped records and the crawl result set
//!
//! The aggregator ([`Dataset`]) grows monotonically while the crawl runs
//! and is finalized exactly once into an immutable [`ResultSet`]. Insertion
//! order is visitation order; nothing is deduplicated or sorted.

/// One scraped book, all fields captured as raw text
///
/// No type coercion, currency parsing, or numeric conversion happens here;
/// prices keep their currency formatting and counts stay numeric strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub upc: String,
    pub product_type: String,
    pub price_excl_tax: String,
    pub price_incl_tax: String,
    pub tax: String,
    pub availability: String,
    pub review_count: String,
    /// One of the catalog's rating labels (e.g. "Three"), taken verbatim
    pub rating: String,
    /// Detail page address; unique within a single crawl
    pub source_url: String,
}

impl BookRecord {
    /// Export column headers, in schema order
    pub const COLUMNS: [&'static str; 10] = [
        "Title",
        "UPC",
        "Product Type",
        "Price (excl. tax)",
        "Price (incl. tax)",
        "Tax",
        "Availability",
        "Number of reviews",
        "Rating",
        "URL",
    ];

    /// The record's fields in [`Self::COLUMNS`] order
    pub fn as_row(&self) -> [&str; 10] {
        [
            &self.title,
            &self.upc,
            &self.product_type,
            &self.price_excl_tax,
            &self.price_incl_tax,
            &self.tax,
            &self.availability,
            &self.review_count,
            &self.rating,
            &self.source_url,
        ]
    }
}

/// Order-preserving accumulator for successfully extracted records
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<BookRecord>,
}

impl Dataset {
    /// Creates an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the end, preserving visitation order
    pub fn append(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seals the dataset into an immutable result set
    pub fn finalize(self) -> ResultSet {
        ResultSet {
            records: self.records,
        }
    }
}

/// The finished, immutable outcome of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<BookRecord>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.records.iter()
    }

    /// Projects the rows whose title contains `needle`, case-insensitively
    ///
    /// Relative order of the retained rows is unchanged.
    pub fn filter_by_title(&self, needle: &str) -> ResultSet {
        let needle = needle.to_lowercase();
        ResultSet {
            records: self
                .records
                .iter()
                .filter(|r| r.title.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, url: &str) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            upc: "upc".to_string(),
            product_type: "Books".to_string(),
            price_excl_tax: "£10.00".to_string(),
            price_incl_tax: "£10.00".to_string(),
            tax: "£0.00".to_string(),
            availability: "In stock".to_string(),
            review_count: "0".to_string(),
            rating: "Three".to_string(),
            source_url: url.to_string(),
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut dataset = Dataset::new();
        dataset.append(record("First", "http://example.com/1"));
        dataset.append(record("Second", "http://example.com/2"));
        dataset.append(record("Third", "http://example.com/3"));

        let set = dataset.finalize();
        let titles: Vec<_> = set.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_empty_dataset_finalizes_empty() {
        let set = Dataset::new().finalize();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_filter_by_title_is_case_insensitive() {
        let mut dataset = Dataset::new();
        dataset.append(record("A Light in the Attic", "http://example.com/1"));
        dataset.append(record("Tipping the Velvet", "http://example.com/2"));
        dataset.append(record("Starlight", "http://example.com/3"));

        let set = dataset.finalize();
        let filtered = set.filter_by_title("LIGHT");

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records()[0].title, "A Light in the Attic");
        assert_eq!(filtered.records()[1].title, "Starlight");
    }

    #[test]
    fn test_filter_keeps_original_untouched() {
        let mut dataset = Dataset::new();
        dataset.append(record("One", "http://example.com/1"));
        let set = dataset.finalize();

        let filtered = set.filter_by_title("no match");
        assert!(filtered.is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_row_matches_column_order() {
        let r = record("Title here", "http://example.com/x");
        let row = r.as_row();
        assert_eq!(row.len(), BookRecord::COLUMNS.len());
        assert_eq!(row[0], "Title here");
        assert_eq!(row[9], "http://example.com/x");
    }
}
