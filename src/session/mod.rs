//! Navigation session abstraction
//!
//! A navigation session owns a single browser-driven rendering context.
//! There is exactly one active page view at a time, and every operation
//! mutates it: opening a URL, clicking a link, or going back all replace
//! what subsequent reads see. The crawl controller owns the session
//! exclusively for the lifetime of a crawl.
//!
//! The trait exists so the crawl loop can be exercised against a scripted
//! in-memory session (see [`crate::testing`]) as well as a live WebDriver.

mod webdriver;

pub use webdriver::WebDriverSession;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors raised by a navigation session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The page failed to load or become ready, or the browser context is
    /// gone. Fatal: aborts the whole crawl.
    #[error("failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    /// No element matched the locator on the settled page. Recoverable at
    /// item granularity.
    #[error("no element matched {locator}")]
    ElementNotFound { locator: String },

    /// The underlying WebDriver connection misbehaved. Fatal.
    #[error("webdriver backend error: {0}")]
    Backend(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// An element locator, either a CSS selector or an XPath expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Css(String),
    XPath(String),
}

impl Target {
    pub fn css(selector: impl Into<String>) -> Self {
        Target::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Target::XPath(expression.into())
    }

    /// The raw selector or expression string
    pub fn selector(&self) -> &str {
        match self {
            Target::Css(s) | Target::XPath(s) => s,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Css(s) => write!(f, "css `{}`", s),
            Target::XPath(s) => write!(f, "xpath `{}`", s),
        }
    }
}

/// A browser-driven page-rendering context
///
/// Navigation operations (`open`, `click`, `click_nth`, `back`) block until
/// the destination page is ready, bounded by the implementation's page-load
/// timeout; exceeding it is a [`SessionError::Navigation`]. Read operations
/// assume the page has already settled and report missing elements as
/// [`SessionError::ElementNotFound`].
///
/// Element handles are never exposed: they would go stale across a
/// navigation. Callers address elements by locator and position index and
/// must re-query after every round trip.
#[async_trait]
pub trait NavigationSession {
    /// Loads the given URL, replacing the current page
    async fn open(&mut self, url: &str) -> SessionResult<()>;

    /// Returns to the previous page in history
    async fn back(&mut self) -> SessionResult<()>;

    /// Number of elements matching the locator (zero is not an error)
    async fn element_count(&mut self, target: &Target) -> SessionResult<usize>;

    /// Text content of the first matching element
    async fn read_text(&mut self, target: &Target) -> SessionResult<String>;

    /// Attribute value of the first matching element
    async fn read_attr(&mut self, target: &Target, attr: &str) -> SessionResult<String>;

    /// Attribute value of the index-th matching element
    async fn read_attr_nth(
        &mut self,
        target: &Target,
        index: usize,
        attr: &str,
    ) -> SessionResult<String>;

    /// Clicks the first matching element and waits for the page to settle
    async fn click(&mut self, target: &Target) -> SessionResult<()>;

    /// Clicks the index-th matching element and waits for the page to settle
    async fn click_nth(&mut self, target: &Target, index: usize) -> SessionResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        assert_eq!(Target::css("h3 a").to_string(), "css `h3 a`");
        assert_eq!(
            Target::xpath("//th/following-sibling::td").to_string(),
            "xpath `//th/following-sibling::td`"
        );
    }

    #[test]
    fn test_target_selector_accessor() {
        assert_eq!(Target::css("li.next a").selector(), "li.next a");
    }

    #[test]
    fn test_element_not_found_message_names_locator() {
        let err = SessionError::ElementNotFound {
            locator: Target::css("p.star-rating").to_string(),
        };
        assert_eq!(err.to_string(), "no element matched css `p.star-rating`");
    }
}
