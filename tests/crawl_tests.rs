//! Integration tests for the crawl controller
//!
//! These drive the full crawl loop against scripted in-memory catalogs and
//! check the end-to-end guarantees: which items end up in the result set,
//! in what order, and how per-item failures differ from fatal ones.

use bookstall::crawler::crawl;
use bookstall::session::SessionError;
use bookstall::testing::{FakeItem, FakePage, FakeSession};

const START: &str = "http://catalog.test/";

fn item(n: u32) -> FakeItem {
    FakeItem::complete(&format!("http://catalog.test/item-{}", n), &format!("Book {}", n))
}

#[tokio::test]
async fn test_two_pages_one_broken_item() {
    // Page 1 has two items, the second missing its rating marker; page 2
    // has one item and no further next control.
    let mut session = FakeSession::new(vec![
        FakePage::with_items(vec![item(1), item(2).without_rating()]),
        FakePage::with_items(vec![item(3)]),
    ]);

    let set = crawl(START, &mut session).await.unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.records()[0].title, "Book 1");
    assert_eq!(set.records()[1].title, "Book 3");
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_set() {
    let mut session = FakeSession::new(vec![FakePage::with_items(vec![])]);

    let set = crawl(START, &mut session).await.unwrap();

    assert!(set.is_empty());
}

#[tokio::test]
async fn test_broken_items_are_skipped_not_substituted() {
    // 7 items across 3 pages, 3 of them unreadable: expect exactly 4 records.
    let mut session = FakeSession::new(vec![
        FakePage::with_items(vec![
            item(1),
            item(2).without_field("UPC"),
            item(3),
        ]),
        FakePage::with_items(vec![
            item(4).without_field("Availability"),
            item(5),
        ]),
        FakePage::with_items(vec![
            item(6).with_rating_class("star-rating"),
            item(7),
        ]),
    ]);

    let set = crawl(START, &mut session).await.unwrap();

    assert_eq!(set.len(), 4);
    let titles: Vec<_> = set.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Book 1", "Book 3", "Book 5", "Book 7"]);
}

#[tokio::test]
async fn test_visitation_order_is_page_then_link_index() {
    let pages = vec![
        vec![item(1), item(2)],
        vec![item(3)],
        vec![item(4), item(5), item(6)],
    ];
    let expected: Vec<String> = pages
        .iter()
        .flatten()
        .map(|i| i.url().to_string())
        .collect();
    let mut session =
        FakeSession::new(pages.into_iter().map(FakePage::with_items).collect());

    let set = crawl(START, &mut session).await.unwrap();

    let urls: Vec<_> = set.iter().map(|r| r.source_url.clone()).collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_source_urls_are_pairwise_distinct() {
    let mut session = FakeSession::new(vec![
        FakePage::with_items(vec![item(1), item(2), item(3)]),
        FakePage::with_items(vec![item(4), item(5)]),
    ]);

    let set = crawl(START, &mut session).await.unwrap();

    let mut urls: Vec<_> = set.iter().map(|r| r.source_url.clone()).collect();
    let total = urls.len();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), total);
}

#[tokio::test]
async fn test_same_catalog_crawled_twice_gives_equal_results() {
    let catalog = || {
        vec![
            FakePage::with_items(vec![item(1), item(2).without_field("Tax")]),
            FakePage::with_items(vec![item(3)]),
        ]
    };

    let mut first_session = FakeSession::new(catalog());
    let mut second_session = FakeSession::new(catalog());

    let first = crawl(START, &mut first_session).await.unwrap();
    let second = crawl(START, &mut second_session).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unreachable_catalog_is_fatal() {
    let mut session = FakeSession::failing_open();

    let err = crawl(START, &mut session).await.unwrap_err();

    assert!(matches!(err, SessionError::Navigation { .. }));
}

#[tokio::test]
async fn test_extracted_fields_carry_page_values() {
    let detailed = FakeItem::complete("http://catalog.test/item-1", "A Light in the Attic")
        .with_field("UPC", "a897fe39b1053632")
        .with_field("Product Type", "Books")
        .with_field("Price (excl. tax)", "£51.77")
        .with_field("Price (incl. tax)", "£51.77")
        .with_field("Tax", "£0.00")
        .with_field("Availability", "In stock (22 available)")
        .with_field("Number of reviews", "0")
        .with_rating_class("star-rating Three");
    let mut session = FakeSession::new(vec![FakePage::with_items(vec![detailed])]);

    let set = crawl(START, &mut session).await.unwrap();

    assert_eq!(set.len(), 1);
    let record = &set.records()[0];
    assert_eq!(record.title, "A Light in the Attic");
    assert_eq!(record.upc, "a897fe39b1053632");
    assert_eq!(record.product_type, "Books");
    assert_eq!(record.price_excl_tax, "£51.77");
    assert_eq!(record.price_incl_tax, "£51.77");
    assert_eq!(record.tax, "£0.00");
    assert_eq!(record.availability, "In stock (22 available)");
    assert_eq!(record.review_count, "0");
    assert_eq!(record.rating, "Three");
    assert_eq!(record.source_url, "http://catalog.test/item-1");
}
