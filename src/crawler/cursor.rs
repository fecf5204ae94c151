//! Listing page cursor
//!
//! Enumerates the item links visible on the currently loaded listing page
//! and advances to the next listing page when the current one is exhausted.
//!
//! Link elements go stale the moment the session navigates away, so the
//! cursor never holds element handles. Items are addressed by position
//! index, and every accessor re-queries the live page. After a round trip
//! to an item page the caller must come back through these accessors with
//! the next index rather than reusing anything read earlier.

use crate::session::{NavigationSession, SessionError, SessionResult, Target};

/// CSS selector for the item detail links on a listing page
pub const ITEM_LINKS: &str = "h3 a";

/// CSS selector for the next-page control
pub const NEXT_CONTROL: &str = "li.next a";

/// Outcome of trying to advance to the next listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAdvance {
    /// The session is now on the next listing page
    Next,
    /// No next-page control exists; normal end of the catalog
    End,
}

/// Cursor over the item links of the presently loaded listing page
#[derive(Debug)]
pub struct ListingCursor {
    items: Target,
    next: Target,
}

impl ListingCursor {
    pub fn new() -> Self {
        Self {
            items: Target::css(ITEM_LINKS),
            next: Target::css(NEXT_CONTROL),
        }
    }

    /// Number of item links on the current listing page (zero is valid)
    pub async fn item_count<S: NavigationSession + Send>(
        &self,
        session: &mut S,
    ) -> SessionResult<usize> {
        session.element_count(&self.items).await
    }

    /// Detail URL of the index-th item link, re-queried from the live page
    pub async fn item_link_url<S: NavigationSession + Send>(
        &self,
        session: &mut S,
        index: usize,
    ) -> SessionResult<String> {
        session.read_attr_nth(&self.items, index, "href").await
    }

    /// Clicks through to the index-th item's detail page
    pub async fn open_item<S: NavigationSession + Send>(
        &self,
        session: &mut S,
        index: usize,
    ) -> SessionResult<()> {
        session.click_nth(&self.items, index).await
    }

    /// Moves the session to the next listing page, or reports the end of
    /// the catalog when no next control is present
    pub async fn advance<S: NavigationSession + Send>(
        &self,
        session: &mut S,
    ) -> SessionResult<PageAdvance> {
        match session.click(&self.next).await {
            Ok(()) => Ok(PageAdvance::Next),
            Err(SessionError::ElementNotFound { .. }) => Ok(PageAdvance::End),
            Err(e) => Err(e),
        }
    }
}

impl Default for ListingCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeItem, FakePage, FakeSession};

    #[tokio::test]
    async fn test_item_count_reflects_current_page() {
        let mut session = FakeSession::new(vec![FakePage::with_items(vec![
            FakeItem::complete("http://example.com/a", "A"),
            FakeItem::complete("http://example.com/b", "B"),
        ])]);
        session.open("http://example.com/").await.unwrap();

        let cursor = ListingCursor::new();
        assert_eq!(cursor.item_count(&mut session).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_item_link_url_is_positional() {
        let mut session = FakeSession::new(vec![FakePage::with_items(vec![
            FakeItem::complete("http://example.com/a", "A"),
            FakeItem::complete("http://example.com/b", "B"),
        ])]);
        session.open("http://example.com/").await.unwrap();

        let cursor = ListingCursor::new();
        assert_eq!(
            cursor.item_link_url(&mut session, 1).await.unwrap(),
            "http://example.com/b"
        );
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_element_not_found() {
        let mut session = FakeSession::new(vec![FakePage::with_items(vec![])]);
        session.open("http://example.com/").await.unwrap();

        let cursor = ListingCursor::new();
        let err = cursor.item_link_url(&mut session, 0).await.unwrap_err();
        assert!(matches!(err, SessionError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_advance_signals_end_on_last_page() {
        let mut session = FakeSession::new(vec![FakePage::with_items(vec![])]);
        session.open("http://example.com/").await.unwrap();

        let cursor = ListingCursor::new();
        assert_eq!(cursor.advance(&mut session).await.unwrap(), PageAdvance::End);
    }

    #[tokio::test]
    async fn test_advance_moves_to_next_page() {
        let mut session = FakeSession::new(vec![
            FakePage::with_items(vec![FakeItem::complete("http://example.com/a", "A")]),
            FakePage::with_items(vec![
                FakeItem::complete("http://example.com/b", "B"),
                FakeItem::complete("http://example.com/c", "C"),
            ]),
        ]);
        session.open("http://example.com/").await.unwrap();

        let cursor = ListingCursor::new();
        assert_eq!(
            cursor.advance(&mut session).await.unwrap(),
            PageAdvance::Next
        );
        assert_eq!(cursor.item_count(&mut session).await.unwrap(), 2);
    }
}
