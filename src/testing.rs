//! Testing utilities: a scripted in-memory navigation session
//!
//! Useful for exercising the crawl loop against a known catalog without a
//! browser or network. The fake models listing pages holding item links, a
//! next-page chain, and per-item field text, and it honours the same
//! one-page-view-at-a-time semantics as the live session: clicking an item
//! replaces the view, `back` restores the listing, and links are only
//! addressable by index on the page currently in view.

use crate::crawler::{labeled_cell, FIELD_LABELS, ITEM_LINKS, NEXT_CONTROL, RATING_MARKER, TITLE};
use crate::session::{NavigationSession, SessionError, SessionResult, Target};
use async_trait::async_trait;
use std::collections::HashMap;

/// One scripted item detail page
#[derive(Debug, Clone)]
pub struct FakeItem {
    url: String,
    texts: HashMap<String, String>,
    rating_class: Option<String>,
}

impl FakeItem {
    /// An item with every extractable field present
    ///
    /// Labeled cells default to "<label> value"; override what a test
    /// asserts on with [`Self::with_field`].
    pub fn complete(url: &str, title: &str) -> Self {
        let mut texts = HashMap::new();
        texts.insert(TITLE.to_string(), title.to_string());
        for label in FIELD_LABELS {
            texts.insert(
                labeled_cell(label).selector().to_string(),
                format!("{} value", label),
            );
        }
        Self {
            url: url.to_string(),
            texts,
            rating_class: Some("star-rating Three".to_string()),
        }
    }

    /// Sets the text of one labeled product-information cell
    pub fn with_field(mut self, label: &str, value: &str) -> Self {
        self.texts
            .insert(labeled_cell(label).selector().to_string(), value.to_string());
        self
    }

    /// Removes a labeled cell, making the item unextractable
    pub fn without_field(mut self, label: &str) -> Self {
        self.texts.remove(labeled_cell(label).selector());
        self
    }

    /// Overrides the rating marker's class attribute
    pub fn with_rating_class(mut self, class: &str) -> Self {
        self.rating_class = Some(class.to_string());
        self
    }

    /// Removes the rating marker entirely
    pub fn without_rating(mut self) -> Self {
        self.rating_class = None;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// One scripted listing page
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    items: Vec<FakeItem>,
}

impl FakePage {
    pub fn with_items(items: Vec<FakeItem>) -> Self {
        Self { items }
    }
}

/// What the single page view currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Location {
    #[default]
    Nowhere,
    Listing(usize),
    Item {
        page: usize,
        index: usize,
    },
}

/// Scripted [`NavigationSession`] over an in-memory catalog
///
/// Pages are chained in order: every page but the last carries a next-page
/// control.
#[derive(Debug, Default)]
pub struct FakeSession {
    pages: Vec<FakePage>,
    location: Location,
    history: Vec<Location>,
    fail_open: bool,
}

impl FakeSession {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// A session whose `open` always fails, as if the browser were gone
    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    fn listing(&self) -> SessionResult<usize> {
        match self.location {
            Location::Listing(page) => Ok(page),
            _ => Err(SessionError::Backend(
                "fake session is not on a listing page".to_string(),
            )),
        }
    }

    fn item(&self) -> SessionResult<&FakeItem> {
        match self.location {
            Location::Item { page, index } => Ok(&self.pages[page].items[index]),
            _ => Err(SessionError::Backend(
                "fake session is not on an item page".to_string(),
            )),
        }
    }

    fn not_found(target: &Target) -> SessionError {
        SessionError::ElementNotFound {
            locator: target.to_string(),
        }
    }
}

#[async_trait]
impl NavigationSession for FakeSession {
    async fn open(&mut self, url: &str) -> SessionResult<()> {
        if self.fail_open {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        self.location = Location::Listing(0);
        self.history.clear();
        Ok(())
    }

    async fn back(&mut self) -> SessionResult<()> {
        match self.history.pop() {
            Some(previous) => {
                self.location = previous;
                Ok(())
            }
            None => Err(SessionError::Backend(
                "no history to go back to".to_string(),
            )),
        }
    }

    async fn element_count(&mut self, target: &Target) -> SessionResult<usize> {
        if target.selector() == ITEM_LINKS {
            if let Location::Listing(page) = self.location {
                return Ok(self.pages[page].items.len());
            }
        }
        Ok(0)
    }

    async fn read_text(&mut self, target: &Target) -> SessionResult<String> {
        let item = self.item()?;
        item.texts
            .get(target.selector())
            .cloned()
            .ok_or_else(|| Self::not_found(target))
    }

    async fn read_attr(&mut self, target: &Target, attr: &str) -> SessionResult<String> {
        let item = self.item()?;
        if target.selector() == RATING_MARKER && attr == "class" {
            item.rating_class
                .clone()
                .ok_or_else(|| Self::not_found(target))
        } else {
            Err(Self::not_found(target))
        }
    }

    async fn read_attr_nth(
        &mut self,
        target: &Target,
        index: usize,
        attr: &str,
    ) -> SessionResult<String> {
        let page = self.listing()?;
        if target.selector() == ITEM_LINKS && attr == "href" {
            if let Some(item) = self.pages[page].items.get(index) {
                return Ok(item.url.clone());
            }
        }
        Err(Self::not_found(target))
    }

    async fn click(&mut self, target: &Target) -> SessionResult<()> {
        let page = self.listing()?;
        if target.selector() == NEXT_CONTROL && page + 1 < self.pages.len() {
            self.history.push(self.location);
            self.location = Location::Listing(page + 1);
            return Ok(());
        }
        Err(Self::not_found(target))
    }

    async fn click_nth(&mut self, target: &Target, index: usize) -> SessionResult<()> {
        let page = self.listing()?;
        if target.selector() == ITEM_LINKS && index < self.pages[page].items.len() {
            self.history.push(self.location);
            self.location = Location::Item { page, index };
            return Ok(());
        }
        Err(Self::not_found(target))
    }
}
