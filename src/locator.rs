//! Element locator expressions.
//!
//! A [`Locator`] identifies zero or more elements by an XPath expression. It
//! is built once per chain segment, never mutated, and consumed by exactly
//! one terminal operation.
//!
//! # Example
//!
//! ```
//! use fluent_webdriver::{select_by, Locator};
//!
//! // Composed from tag + attribute + value (exact match)
//! let locator = select_by("input", "id").equal_to("q");
//! assert_eq!(locator.expression(), "//input[@id='q']");
//!
//! // Raw, pre-built expression
//! let raw = Locator::raw("//button[@type='submit']");
//! assert_eq!(raw.expression(), "//button[@type='submit']");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Locator
// ============================================================================

/// An immutable XPath locator expression.
///
/// Equal inputs always produce equal locators; two locators built from the
/// same tag/attribute/value are interchangeable downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator {
    expression: String,
}

impl Locator {
    /// Creates a locator from a raw, pre-built XPath expression.
    ///
    /// Bypasses tag/attribute composition entirely; the expression is used
    /// verbatim.
    #[inline]
    pub fn raw(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// Creates an exact-match locator from tag, attribute and value.
    ///
    /// `tag_name` and `attribute_name` must be non-empty. `value` is
    /// interpolated verbatim: no escaping is performed, so callers must
    /// avoid characters that break XPath string syntax (notably `'`).
    #[must_use]
    pub fn of(tag_name: &str, attribute_name: &str, value: &str) -> Self {
        debug_assert!(!tag_name.is_empty(), "tag name must be non-empty");
        debug_assert!(!attribute_name.is_empty(), "attribute name must be non-empty");
        Self {
            expression: format!("//{tag_name}[@{attribute_name}='{value}']"),
        }
    }

    /// Returns the XPath expression.
    #[inline]
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for Locator {
    /// Converts a string to a raw locator.
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for Locator {
    /// Converts a string to a raw locator.
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}

// ============================================================================
// LocatorBuilder
// ============================================================================

/// Starts building a locator from a tag name and an attribute name.
///
/// Finish with [`LocatorBuilder::equal_to`].
#[inline]
#[must_use]
pub fn select_by(tag_name: impl Into<String>, attribute_name: impl Into<String>) -> LocatorBuilder {
    LocatorBuilder {
        tag_name: tag_name.into(),
        attribute_name: attribute_name.into(),
    }
}

/// Intermediate state of [`select_by`], waiting for the attribute value.
#[derive(Debug, Clone)]
pub struct LocatorBuilder {
    tag_name: String,
    attribute_name: String,
}

impl LocatorBuilder {
    /// Completes the locator with the exact attribute value to match.
    #[must_use]
    pub fn equal_to(self, value: impl AsRef<str>) -> Locator {
        Locator::of(&self.tag_name, &self.attribute_name, value.as_ref())
    }
}

// ============================================================================
// Tests
// ============================================================================
