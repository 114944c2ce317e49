//! Driver capability interface consumed by the fluent chain.
//!
//! The crate does not automate browsers itself: everything that touches a
//! page goes through [`Driver`] and [`ElementHandle`], implemented by an
//! external backend (a WebDriver client, a CDP client, a test fake). One
//! driver instance backs one chain at a time; builders borrow it and never
//! own it.
//!
//! # Example
//!
//! ```ignore
//! struct MyBackend { /* WebDriver session */ }
//!
//! #[async_trait]
//! impl Driver for MyBackend {
//!     type Element = MyElement;
//!
//!     async fn find_element(&self, locator: &Locator) -> Result<Self::Element> {
//!         // resolve locator.expression() against the page
//!     }
//!     // ...
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::locator::Locator;

// ============================================================================
// Driver
// ============================================================================

/// Capabilities the fluent chain requires from a browser backend.
///
/// Implementations resolve locators, read page state, and dispatch
/// interactions. All methods are asynchronous and fallible; element lookups
/// that match nothing must return [`Error::ElementNotFound`], and reads
/// through a detached handle must return [`Error::StaleElement`] so the wait
/// loop can absorb them.
///
/// [`Error::ElementNotFound`]: crate::Error::ElementNotFound
/// [`Error::StaleElement`]: crate::Error::StaleElement
#[async_trait]
pub trait Driver: Send + Sync {
    /// Handle type for resolved elements.
    type Element: ElementHandle + Send + Sync;

    /// Navigates the session to a URL.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Resolves a locator to a single element.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`] if nothing matches.
    ///
    /// [`Error::ElementNotFound`]: crate::Error::ElementNotFound
    async fn find_element(&self, locator: &Locator) -> Result<Self::Element>;

    /// Returns the current page title.
    async fn current_title(&self) -> Result<String>;

    /// Maximizes the browser window.
    async fn maximize_window(&self) -> Result<()>;

    /// Resizes the browser window.
    async fn set_window_size(&self, width: u32, height: u32) -> Result<()>;

    /// Moves the browser window.
    async fn set_window_position(&self, x: i32, y: i32) -> Result<()>;

    /// Fetches log entries from the named channel, unprocessed.
    async fn fetch_logs(&self, channel: &str) -> Result<Vec<LogEntry>>;
}

// ============================================================================
// ElementHandle
// ============================================================================

/// A resolved element, valid until the underlying DOM node is replaced.
///
/// Handles are short-lived: assertion builders re-resolve on every poll
/// iteration and never cache one across polls.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Returns `true` if the element is currently rendered.
    async fn is_displayed(&self) -> Result<bool>;

    /// Returns the element's rendered text, or `None` if it has none.
    async fn text(&self) -> Result<Option<String>>;

    /// Returns the named attribute's value, or `None` if it is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Clicks the element.
    async fn click(&self) -> Result<()>;

    /// Sends keystrokes to the element.
    async fn send_keys(&self, keys: &str) -> Result<()>;
}

// ============================================================================
// Log Entries
// ============================================================================

/// Severity of a browser log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug-level message.
    Debug,
    /// Informational message.
    Info,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

/// A single entry from a browser log channel.
///
/// Passed through from the backend without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry severity.
    pub level: LogLevel,
    /// Log message text.
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl LogEntry {
    /// Creates a log entry.
    #[inline]
    pub fn new(level: LogLevel, message: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp_ms,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_new() {
        let entry = LogEntry::new(LogLevel::Warning, "mixed content", 1_700_000_000_000);
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.message, "mixed content");
        assert_eq!(entry.timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn test_log_entry_equality() {
        let a = LogEntry::new(LogLevel::Info, "loaded", 1);
        let b = LogEntry::new(LogLevel::Info, "loaded", 1);
        assert_eq!(a, b);
    }
}
