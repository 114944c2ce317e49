//! Terminal interaction verbs: click and send-keys.
//!
//! Unlike the assertion builders, an [`Action`] does not wait: it resolves
//! its element once, dispatches the interaction, and surfaces
//! [`Error::ElementNotFound`] immediately if the locator matches nothing.
//! Callers are expected to have established readiness first (typically with
//! an element assertion on the same locator).
//!
//! [`Error::ElementNotFound`]: crate::Error::ElementNotFound

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::chain::{Fluent, Follower};
use crate::driver::{Driver, ElementHandle};
use crate::error::Result;
use crate::locator::Locator;
use crate::select::FromLocator;

// ============================================================================
// Action
// ============================================================================

/// An interaction bound to a locator, ready to dispatch.
///
/// Single-use: each terminal method consumes the action and returns a
/// [`Follower`] carrying the same locator forward.
#[derive(Debug)]
pub struct Action<'d, D> {
    chain: Fluent<'d, D>,
    locator: Locator,
}

impl<'d, D: Driver> FromLocator<'d, D> for Action<'d, D> {
    fn from_locator(chain: Fluent<'d, D>, locator: Locator) -> Self {
        Self { chain, locator }
    }
}

impl<'d, D: Driver> Action<'d, D> {
    /// Returns the locator this action is bound to.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Clicks the element.
    ///
    /// Resolves the element at dispatch time; nothing from an earlier
    /// assertion on the same locator is reused.
    ///
    /// # Errors
    ///
    /// Propagates driver failures unchanged, including
    /// [`Error::ElementNotFound`] when the locator matches nothing.
    ///
    /// [`Error::ElementNotFound`]: crate::Error::ElementNotFound
    pub async fn click(self) -> Result<Follower<'d, D>> {
        let Self { chain, locator } = self;

        let element = chain.driver.find_element(&locator).await?;
        element.click().await?;

        debug!(locator = %locator, "clicked");
        Ok(Follower::new(chain, locator))
    }

    /// Sends keystrokes to the element.
    ///
    /// # Errors
    ///
    /// Propagates driver failures unchanged, including
    /// [`Error::ElementNotFound`] when the locator matches nothing.
    ///
    /// [`Error::ElementNotFound`]: crate::Error::ElementNotFound
    pub async fn send_keys(self, keys: &str) -> Result<Follower<'d, D>> {
        let Self { chain, locator } = self;

        let element = chain.driver.find_element(&locator).await?;
        element.send_keys(keys).await?;

        debug!(locator = %locator, count = keys.chars().count(), "sent keys");
        Ok(Follower::new(chain, locator))
    }
}

// ============================================================================
// Tests
// ============================================================================
