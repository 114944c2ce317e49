//! Fluent WebDriver - a chained assertion and interaction DSL for browser
//! tests.
//!
//! This library lets test authors express UI assertions and interactions as
//! readable fluent chains ("verify that the input with id `q` is displayed,
//! then type into it") over any backend implementing the [`Driver`] trait.
//!
//! # Architecture
//!
//! The crate is a chain of builders, each short-lived and single-use:
//!
//! - Selector stages assemble an XPath [`Locator`] from tag + attribute +
//!   value, then hand it to a terminal builder at construction time
//! - Assertion builders poll a predicate through the wait loop until it
//!   holds or the timeout expires
//! - Action builders resolve the element once and dispatch immediately
//! - Every terminal operation returns a [`Follower`] / [`PageFollower`]
//!   continuation from which the next statement begins
//!
//! Key design principles:
//!
//! - The driver session is borrowed, never owned; it is the only state
//!   shared between statements
//! - Elements are re-resolved fresh on every poll iteration (no stale
//!   handle caching)
//! - Transient read failures during a poll are absorbed, surfacing as a
//!   single timeout at the deadline
//!
//! # Quick Start
//!
//! ```ignore
//! use fluent_webdriver::{using, Result};
//!
//! async fn login_flow(driver: &impl fluent_webdriver::Driver) -> Result<()> {
//!     using(driver)
//!         .open("https://example.com/login")
//!         .await?
//!         .then()
//!         .verify_page()
//!         .title_starts_with("Login")
//!         .await?
//!         .then()
//!         .verify_element()
//!         .tag("input")
//!         .with("id")
//!         .equal_to("q")
//!         .is_displayed()
//!         .await?
//!         .so()
//!         .send_keys("hello")
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chain`] | Chain root: [`using`], [`Fluent`], followers |
//! | [`check`] | Assertion builders: element, text, attribute, page |
//! | [`action`] | Interaction builders: click, send-keys |
//! | [`select`] | Selector composition: tag → attribute → value |
//! | [`locator`] | XPath locator expressions |
//! | [`wait`] | Wait configuration and the poll loop |
//! | [`driver`] | Driver capability traits (implemented by backends) |
//! | [`error`] | Error types and [`Result`] alias |

// ============================================================================
// Modules
// ============================================================================

/// Interaction builders: click, send-keys.
pub mod action;

/// Chain root and continuation tokens.
///
/// Use [`using`] to start a chain over a borrowed driver.
pub mod chain;

/// Assertion builders for elements, text, attributes, and the page.
pub mod check;

/// Driver capability traits.
///
/// Implement [`Driver`] and [`ElementHandle`] to plug a backend in.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// XPath locator expressions.
pub mod locator;

/// Selector composition from tag, attribute and value.
pub mod select;

/// Wait configuration and the poll-until-true loop.
pub mod wait;

#[cfg(test)]
pub(crate) mod fake;

// ============================================================================
// Re-exports
// ============================================================================

// Chain types
pub use chain::{Fluent, Follower, PageFollower, PauseOutcome, using};

// Builder types
pub use action::Action;
pub use check::{AttributeMatcher, ElementChecker, PageChecker, TextMatcher};
pub use select::{AttributeSelector, FromLocator, TagSelector, ValueSelector};

// Locator types
pub use locator::{Locator, LocatorBuilder, select_by};

// Driver types
pub use driver::{Driver, ElementHandle, LogEntry, LogLevel};

// Wait types
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig, poll_until};

// Error types
pub use error::{Error, Result};
