//! Element and page assertion builders.
//!
//! An [`ElementChecker`] composes a locator with a polled predicate:
//! visibility, text match, text presence, attribute match, attribute
//! presence. A [`PageChecker`] does the same for whole-page predicates.
//! Every predicate re-resolves its element fresh on each poll iteration, so
//! a DOM node replaced between polls is picked up on the next one.
//!
//! Pattern matching follows whole-string semantics: `matches("Log.*")`
//! passes only when the entire text matches the pattern.
//!
//! # Example
//!
//! ```ignore
//! using(&driver)
//!     .verify_element()
//!     .tag("input")
//!     .with("id")
//!     .equal_to("q")
//!     .after(5)
//!     .is_displayed()
//!     .await?
//!     .so()
//!     .send_keys("rust")
//!     .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::chain::{Fluent, Follower, PageFollower};
use crate::driver::{Driver, ElementHandle};
use crate::error::Result;
use crate::locator::Locator;
use crate::select::FromLocator;
use crate::wait::{WaitConfig, poll_until};

// ============================================================================
// Helpers
// ============================================================================

/// Compiles a pattern anchored to match the whole string.
fn whole_match(regexp: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"\A(?:{regexp})\z"))?)
}

// ============================================================================
// ElementChecker
// ============================================================================

/// Polled assertions about one element.
///
/// Carries its own [`WaitConfig`]; [`ElementChecker::after`] overrides the
/// timeout for this builder only and must be called before the assertion
/// method, since a wait already underway is not reconfigured.
#[derive(Debug)]
pub struct ElementChecker<'d, D> {
    chain: Fluent<'d, D>,
    locator: Locator,
    wait: WaitConfig,
}

impl<'d, D: Driver> FromLocator<'d, D> for ElementChecker<'d, D> {
    fn from_locator(chain: Fluent<'d, D>, locator: Locator) -> Self {
        Self {
            chain,
            locator,
            wait: WaitConfig::default(),
        }
    }
}

impl<'d, D: Driver> ElementChecker<'d, D> {
    /// Returns the locator this checker is bound to.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Overrides the wait timeout, in seconds, for this checker only.
    ///
    /// Omitted, the default of 10 seconds applies.
    #[must_use]
    pub fn after(mut self, seconds: u64) -> Self {
        self.wait = self.wait.with_timeout(Duration::from_secs(seconds));
        self
    }

    #[cfg(test)]
    pub(crate) fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Waits until the element is rendered.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the element never becomes visible within the
    /// configured wait.
    ///
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn is_displayed(self) -> Result<Follower<'d, D>> {
        let Self {
            chain,
            locator,
            wait,
        } = self;

        {
            let driver = chain.driver;
            let loc = &locator;
            let condition = format!("element {loc} is displayed");
            poll_until(wait, &condition, move || async move {
                let element = driver.find_element(loc).await?;
                element.is_displayed().await
            })
            .await?;
        }

        debug!(locator = %locator, "element displayed");
        Ok(Follower::new(chain, locator))
    }

    /// Starts a text assertion on the element.
    #[must_use]
    pub fn text(self) -> TextMatcher<'d, D> {
        TextMatcher {
            chain: self.chain,
            locator: self.locator,
            wait: self.wait,
        }
    }

    /// Starts an assertion on the named attribute.
    #[must_use]
    pub fn attribute(self, attribute_name: impl Into<String>) -> AttributeMatcher<'d, D> {
        AttributeMatcher {
            chain: self.chain,
            locator: self.locator,
            wait: self.wait,
            attribute: attribute_name.into(),
        }
    }
}

// ============================================================================
// TextMatcher
// ============================================================================

/// Polled assertions about an element's text.
#[derive(Debug)]
pub struct TextMatcher<'d, D> {
    chain: Fluent<'d, D>,
    locator: Locator,
    wait: WaitConfig,
}

impl<'d, D: Driver> TextMatcher<'d, D> {
    /// Waits until the element's rendered text matches `regexp` in full.
    ///
    /// Absent text never matches, so against an element that never gains
    /// text this expires as a timeout rather than failing fast.
    ///
    /// # Errors
    ///
    /// [`Error::Pattern`] if `regexp` is invalid, [`Error::Timeout`] on
    /// expiry.
    ///
    /// [`Error::Pattern`]: crate::Error::Pattern
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn matches(self, regexp: &str) -> Result<Follower<'d, D>> {
        let Self {
            chain,
            locator,
            wait,
        } = self;
        let pattern = whole_match(regexp)?;

        {
            let driver = chain.driver;
            let loc = &locator;
            let re = &pattern;
            let condition = format!("text of {loc} matches /{regexp}/");
            poll_until(wait, &condition, move || async move {
                let element = driver.find_element(loc).await?;
                let text = element.text().await?;
                Ok(text.map(|t| re.is_match(&t)).unwrap_or(false))
            })
            .await?;
        }

        debug!(locator = %locator, pattern = regexp, "text matched");
        Ok(Follower::new(chain, locator))
    }

    /// Waits until the element's `value` attribute matches `regexp` in full.
    ///
    /// Same semantics as [`TextMatcher::matches`], reading the `value`
    /// attribute instead of rendered text.
    ///
    /// # Errors
    ///
    /// [`Error::Pattern`] if `regexp` is invalid, [`Error::Timeout`] on
    /// expiry.
    ///
    /// [`Error::Pattern`]: crate::Error::Pattern
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn matches_value(self, regexp: &str) -> Result<Follower<'d, D>> {
        let Self {
            chain,
            locator,
            wait,
        } = self;
        let pattern = whole_match(regexp)?;

        {
            let driver = chain.driver;
            let loc = &locator;
            let re = &pattern;
            let condition = format!("value of {loc} matches /{regexp}/");
            poll_until(wait, &condition, move || async move {
                let element = driver.find_element(loc).await?;
                let value = element.attribute("value").await?;
                Ok(value.map(|v| re.is_match(&v)).unwrap_or(false))
            })
            .await?;
        }

        debug!(locator = %locator, pattern = regexp, "value matched");
        Ok(Follower::new(chain, locator))
    }

    /// Waits until the element has any text at all.
    ///
    /// The pattern argument is accepted for signature parity with
    /// [`TextMatcher::matches`] but is not evaluated; only presence is
    /// checked.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the element never gains text.
    ///
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn extsts(self, _regexp: &str) -> Result<Follower<'d, D>> {
        let Self {
            chain,
            locator,
            wait,
        } = self;

        {
            let driver = chain.driver;
            let loc = &locator;
            let condition = format!("text of {loc} is present");
            poll_until(wait, &condition, move || async move {
                let element = driver.find_element(loc).await?;
                Ok(element.text().await?.is_some())
            })
            .await?;
        }

        debug!(locator = %locator, "text present");
        Ok(Follower::new(chain, locator))
    }
}

// ============================================================================
// AttributeMatcher
// ============================================================================

/// Polled assertions about one attribute of an element.
#[derive(Debug)]
pub struct AttributeMatcher<'d, D> {
    chain: Fluent<'d, D>,
    locator: Locator,
    wait: WaitConfig,
    attribute: String,
}

impl<'d, D: Driver> AttributeMatcher<'d, D> {
    /// Waits until the attribute's value matches `regexp` in full.
    ///
    /// An absent attribute never matches; see [`TextMatcher::matches`].
    ///
    /// # Errors
    ///
    /// [`Error::Pattern`] if `regexp` is invalid, [`Error::Timeout`] on
    /// expiry.
    ///
    /// [`Error::Pattern`]: crate::Error::Pattern
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn matches(self, regexp: &str) -> Result<Follower<'d, D>> {
        let Self {
            chain,
            locator,
            wait,
            attribute,
        } = self;
        let pattern = whole_match(regexp)?;

        {
            let driver = chain.driver;
            let loc = &locator;
            let re = &pattern;
            let name = attribute.as_str();
            let condition = format!("attribute '{name}' of {loc} matches /{regexp}/");
            poll_until(wait, &condition, move || async move {
                let element = driver.find_element(loc).await?;
                let value = element.attribute(name).await?;
                Ok(value.map(|v| re.is_match(&v)).unwrap_or(false))
            })
            .await?;
        }

        debug!(locator = %locator, attribute = %attribute, "attribute matched");
        Ok(Follower::new(chain, locator))
    }

    /// Waits until the attribute is present.
    ///
    /// The pattern argument is accepted for signature parity with
    /// [`AttributeMatcher::matches`] but is not evaluated; only presence is
    /// checked.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the attribute never appears.
    ///
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn extsts(self, _regexp: &str) -> Result<Follower<'d, D>> {
        let Self {
            chain,
            locator,
            wait,
            attribute,
        } = self;

        {
            let driver = chain.driver;
            let loc = &locator;
            let name = attribute.as_str();
            let condition = format!("attribute '{name}' of {loc} is present");
            poll_until(wait, &condition, move || async move {
                let element = driver.find_element(loc).await?;
                Ok(element.attribute(name).await?.is_some())
            })
            .await?;
        }

        debug!(locator = %locator, attribute = %attribute, "attribute present");
        Ok(Follower::new(chain, locator))
    }
}

// ============================================================================
// PageChecker
// ============================================================================

/// Polled assertions about the page as a whole.
#[derive(Debug)]
pub struct PageChecker<'d, D> {
    chain: Fluent<'d, D>,
    wait: WaitConfig,
}

impl<'d, D: Driver> PageChecker<'d, D> {
    pub(crate) fn new(chain: Fluent<'d, D>) -> Self {
        Self {
            chain,
            wait: WaitConfig::default(),
        }
    }

    /// Overrides the wait timeout, in seconds, for this checker only.
    #[must_use]
    pub fn after(mut self, seconds: u64) -> Self {
        self.wait = self.wait.with_timeout(Duration::from_secs(seconds));
        self
    }

    #[cfg(test)]
    pub(crate) fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Waits until the page title starts with `prefix`.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the title never gains the prefix.
    ///
    /// [`Error::Timeout`]: crate::Error::Timeout
    pub async fn title_starts_with(self, prefix: &str) -> Result<PageFollower<'d, D>> {
        let Self { chain, wait } = self;

        {
            let driver = chain.driver;
            let condition = format!("page title starts with '{prefix}'");
            poll_until(wait, &condition, move || async move {
                Ok(driver.current_title().await?.starts_with(prefix))
            })
            .await?;
        }

        debug!(prefix, "title verified");
        Ok(PageFollower::new(chain))
    }
}

// ============================================================================
// Tests
// ============================================================================
