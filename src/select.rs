//! Selector composition: a builder of builders.
//!
//! [`TagSelector`] defers construction of its terminal object (an assertion
//! builder, an action builder, or any future [`FromLocator`] type) until the
//! locator is fully specified, then builds it in one step with the finished
//! locator injected at construction time. There is no partially-initialized
//! terminal object at any point.
//!
//! # Example
//!
//! ```ignore
//! using(&driver)
//!     .verify_element()      // TagSelector<ElementChecker>
//!     .tag("input")          // AttributeSelector
//!     .with("id")            // ValueSelector
//!     .equal_to("q")         // ElementChecker bound to //input[@id='q']
//!     .is_displayed()
//!     .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::marker::PhantomData;

use crate::chain::Fluent;
use crate::driver::Driver;
use crate::locator::Locator;

// ============================================================================
// FromLocator
// ============================================================================

/// A terminal object that can be built from a chain handle and a finished
/// locator.
///
/// Implemented by the assertion and action builders; implementing it on a new
/// terminal type makes that type composable through [`TagSelector`] without
/// touching the selector itself.
pub trait FromLocator<'d, D: Driver>: Sized {
    /// Builds the terminal object with the locator injected up front.
    fn from_locator(chain: Fluent<'d, D>, locator: Locator) -> Self;
}

// ============================================================================
// TagSelector
// ============================================================================

/// First selector stage: choose the element's tag name.
#[derive(Debug)]
pub struct TagSelector<'d, D, T> {
    chain: Fluent<'d, D>,
    _target: PhantomData<T>,
}

impl<'d, D: Driver, T: FromLocator<'d, D>> TagSelector<'d, D, T> {
    pub(crate) fn new(chain: Fluent<'d, D>) -> Self {
        Self {
            chain,
            _target: PhantomData,
        }
    }

    /// Selects elements with the given tag name.
    ///
    /// `tag_name` must be non-empty.
    #[must_use]
    pub fn tag(self, tag_name: impl Into<String>) -> AttributeSelector<'d, D, T> {
        AttributeSelector {
            chain: self.chain,
            tag_name: tag_name.into(),
            _target: PhantomData,
        }
    }
}

// ============================================================================
// AttributeSelector
// ============================================================================

/// Second selector stage: choose the attribute to match on.
#[derive(Debug)]
pub struct AttributeSelector<'d, D, T> {
    chain: Fluent<'d, D>,
    tag_name: String,
    _target: PhantomData<T>,
}

impl<'d, D: Driver, T: FromLocator<'d, D>> AttributeSelector<'d, D, T> {
    /// Selects the attribute whose value the final stage matches against.
    ///
    /// `attribute` must be non-empty.
    #[must_use]
    pub fn with(self, attribute: impl Into<String>) -> ValueSelector<'d, D, T> {
        ValueSelector {
            chain: self.chain,
            tag_name: self.tag_name,
            attribute: attribute.into(),
            _target: PhantomData,
        }
    }
}

// ============================================================================
// ValueSelector
// ============================================================================

/// Final selector stage: supply the attribute value and build the terminal
/// object.
#[derive(Debug)]
pub struct ValueSelector<'d, D, T> {
    chain: Fluent<'d, D>,
    tag_name: String,
    attribute: String,
    _target: PhantomData<T>,
}

impl<'d, D: Driver, T: FromLocator<'d, D>> ValueSelector<'d, D, T> {
    /// Completes the locator with an exact attribute value and returns the
    /// terminal object bound to it.
    #[must_use]
    pub fn equal_to(self, value: impl AsRef<str>) -> T {
        let locator = Locator::of(&self.tag_name, &self.attribute, value.as_ref());
        T::from_locator(self.chain, locator)
    }
}

// ============================================================================
// Tests
// ============================================================================
