//! Crawl controller
//!
//! Drives the whole traversal: for each listing page, for each item link,
//! navigate in, extract, navigate back; advance pages until the catalog
//! runs out.
//!
//! The loop is the listing/item/done state machine. Being on a listing
//! page, it selects the next not-yet-visited link index; after an
//! extraction attempt (success or per-item failure alike) it returns to
//! the listing and re-resolves links by index; once a page is exhausted it
//! advances, and the end-of-catalog signal is the only self-termination.
//! A catalog whose next-links form a cycle therefore never terminates;
//! that is an accepted property of the traversal, not masked here.
//!
//! Per-item extraction failures are logged and skipped. Navigation or
//! backend failures abort the crawl immediately and no partial result set
//! is returned.

use crate::crawler::cursor::{ListingCursor, PageAdvance};
use crate::crawler::extractor::extract;
use crate::dataset::{Dataset, ResultSet};
use crate::session::{NavigationSession, SessionResult};

/// Crawls the catalog starting at `start_url` and returns the finished
/// result set
///
/// The caller supplies an already-constructed session and remains
/// responsible for destroying it afterwards, on success or failure.
pub async fn crawl<S: NavigationSession + Send>(
    start_url: &str,
    session: &mut S,
) -> SessionResult<ResultSet> {
    session.open(start_url).await?;

    let cursor = ListingCursor::new();
    let mut dataset = Dataset::new();
    let mut visited = 0usize;

    loop {
        let item_total = cursor.item_count(session).await?;
        tracing::info!(items = item_total, "starting listing page");

        for index in 0..item_total {
            // Links went stale during the previous round trip; resolve the
            // current one by index from the live page.
            let url = cursor.item_link_url(session, index).await?;
            cursor.open_item(session, index).await?;

            visited += 1;
            tracing::info!(item = visited, url = %url, "reading item");

            match extract(session, &url).await {
                Ok(record) => {
                    tracing::info!(title = %record.title, "item collected");
                    dataset.append(record);
                }
                Err(err) if err.is_recoverable() => {
                    tracing::error!(url = %err.url, cause = %err.cause, "item skipped");
                }
                Err(err) => return Err(err.cause),
            }

            session.back().await?;
        }

        match cursor.advance(session).await? {
            PageAdvance::Next => {}
            PageAdvance::End => break,
        }
    }

    let set = dataset.finalize();
    tracing::info!(collected = set.len(), visited, "end of catalog");
    Ok(set)
}
