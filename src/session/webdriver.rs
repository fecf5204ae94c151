//! Live WebDriver implementation of the navigation session
//!
//! Talks to a running geckodriver/chromedriver instance through fantoccini.
//! Browser configuration (headless mode, window size, sandboxing) is the
//! WebDriver server's concern; this wrapper only drives the one page view.

use crate::config::WebdriverConfig;
use crate::session::{NavigationSession, SessionError, SessionResult, Target};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// A navigation session backed by a live WebDriver client
pub struct WebDriverSession {
    client: Client,
    page_load_timeout: Duration,
    settle_delay: Duration,
}

impl WebDriverSession {
    /// Connects to the WebDriver server named in the configuration
    pub async fn connect(config: &WebdriverConfig) -> SessionResult<Self> {
        let client = ClientBuilder::native()
            .connect(&config.endpoint)
            .await
            .map_err(|e| SessionError::Navigation {
                url: config.endpoint.clone(),
                message: format!("could not reach webdriver server: {}", e),
            })?;

        tracing::info!(endpoint = %config.endpoint, "webdriver session established");

        Ok(Self {
            client,
            page_load_timeout: Duration::from_millis(config.page_load_timeout_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        })
    }

    /// Closes the browser session
    ///
    /// Destroying the session out from under an in-flight crawl aborts that
    /// crawl with a fatal error; this is the only cancellation mechanism.
    pub async fn close(self) -> SessionResult<()> {
        self.client
            .close()
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))
    }

    /// Blocks until the destination page is ready, then applies the fixed
    /// settle delay
    ///
    /// Readiness means the document body is present, bounded by the page
    /// load timeout. Timing out is a navigation failure, not a retry cue.
    async fn settle(&self, context: &str) -> SessionResult<()> {
        self.client
            .wait()
            .at_most(self.page_load_timeout)
            .for_element(Locator::Css("body"))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => SessionError::Navigation {
                    url: context.to_string(),
                    message: format!(
                        "page did not become ready within {}ms",
                        self.page_load_timeout.as_millis()
                    ),
                },
                other => SessionError::Backend(other.to_string()),
            })?;

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        Ok(())
    }

    fn locator<'a>(target: &'a Target) -> Locator<'a> {
        match target {
            Target::Css(s) => Locator::Css(s),
            Target::XPath(s) => Locator::XPath(s),
        }
    }

    /// Maps a find failure onto the session error taxonomy
    fn find_error(target: &Target, err: CmdError) -> SessionError {
        match err {
            err if err.is_no_such_element() => SessionError::ElementNotFound {
                locator: target.to_string(),
            },
            other => SessionError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
impl NavigationSession for WebDriverSession {
    async fn open(&mut self, url: &str) -> SessionResult<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| SessionError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        self.settle(url).await
    }

    async fn back(&mut self) -> SessionResult<()> {
        self.client
            .back()
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        self.settle("history back").await
    }

    async fn element_count(&mut self, target: &Target) -> SessionResult<usize> {
        let elements = self
            .client
            .find_all(Self::locator(target))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        Ok(elements.len())
    }

    async fn read_text(&mut self, target: &Target) -> SessionResult<String> {
        let element = self
            .client
            .find(Self::locator(target))
            .await
            .map_err(|e| Self::find_error(target, e))?;
        element
            .text()
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))
    }

    async fn read_attr(&mut self, target: &Target, attr: &str) -> SessionResult<String> {
        let element = self
            .client
            .find(Self::locator(target))
            .await
            .map_err(|e| Self::find_error(target, e))?;
        element
            .attr(attr)
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?
            .ok_or_else(|| SessionError::ElementNotFound {
                locator: format!("{} [{}]", target, attr),
            })
    }

    async fn read_attr_nth(
        &mut self,
        target: &Target,
        index: usize,
        attr: &str,
    ) -> SessionResult<String> {
        let elements = self
            .client
            .find_all(Self::locator(target))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        let element = elements.get(index).ok_or_else(|| SessionError::ElementNotFound {
            locator: format!("{} [{}]", target, index),
        })?;
        element
            .attr(attr)
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?
            .ok_or_else(|| SessionError::ElementNotFound {
                locator: format!("{} [{}] [{}]", target, index, attr),
            })
    }

    async fn click(&mut self, target: &Target) -> SessionResult<()> {
        let element = self
            .client
            .find(Self::locator(target))
            .await
            .map_err(|e| Self::find_error(target, e))?;
        element
            .click()
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        self.settle(target.selector()).await
    }

    async fn click_nth(&mut self, target: &Target, index: usize) -> SessionResult<()> {
        let elements = self
            .client
            .find_all(Self::locator(target))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        let element = elements.into_iter().nth(index).ok_or_else(|| {
            SessionError::ElementNotFound {
                locator: format!("{} [{}]", target, index),
            }
        })?;
        element
            .click()
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        self.settle(target.selector()).await
    }
}
