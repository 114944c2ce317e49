//! Error types for the fluent DSL.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use fluent_webdriver::{using, Result};
//!
//! async fn example(driver: &impl Driver) -> Result<()> {
//!     using(driver)
//!         .verify_element()
//!         .tag("input")
//!         .with("id")
//!         .equal_to("q")
//!         .is_displayed()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Wait | [`Error::Timeout`] |
//! | Element | [`Error::ElementNotFound`], [`Error::StaleElement`] |
//! | Backend | [`Error::Driver`] |
//! | Matcher | [`Error::Pattern`] |
//!
//! A polled condition that never becomes true is reported as a single
//! [`Error::Timeout`] at its deadline; transient element errors observed
//! while polling are absorbed by the wait loop and never surfaced.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Wait Errors
    // ========================================================================
    /// A polled condition never became true within its deadline.
    ///
    /// Returned by every assertion builder when its wait expires. The chain
    /// does not continue past this statement.
    #[error("Condition not met within {timeout_ms}ms: {condition}")]
    Timeout {
        /// Description of the condition that was polled.
        condition: String,
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// No element matched the locator.
    ///
    /// Surfaced immediately by action builders, which do not retry. Inside a
    /// polled condition this is treated as "not yet satisfied" instead.
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// The locator expression that matched nothing.
        locator: String,
    },

    /// An element reference became invalid between reads.
    ///
    /// Raised by drivers when the DOM node was detached or replaced
    /// mid-operation. The wait loop absorbs this and re-resolves.
    #[error("Stale element: {locator}")]
    StaleElement {
        /// The locator expression the handle was resolved from.
        locator: String,
    },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// The external driver failed.
    ///
    /// Passthrough for backend failures that are neither a missing nor a
    /// stale element. Propagated unchanged, never retried.
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the backend failure.
        message: String,
    },

    // ========================================================================
    // Matcher Errors
    // ========================================================================
    /// A matcher was given an invalid regular expression.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a timeout error.
    #[inline]
    pub fn timeout(condition: impl Into<String>, waited: Duration) -> Self {
        Self::Timeout {
            condition: condition.into(),
            timeout_ms: waited.as_millis() as u64,
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(locator: impl Into<String>) -> Self {
        Self::StaleElement {
            locator: locator.into(),
        }
    }

    /// Creates a driver backend error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if no element matched a locator.
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }

    /// Returns `true` if this error may clear up on the next poll.
    ///
    /// Transient errors are absorbed by the wait loop: a missing element may
    /// still appear and a stale handle is re-resolved on the next iteration.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::StaleElement { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
