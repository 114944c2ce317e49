//! Chain root and continuation tokens.
//!
//! [`using`] wraps a borrowed driver in a [`Fluent`] handle, the root every
//! fluent statement starts from. Terminal operations return a [`Follower`]
//! (element operations, carrying the resolved locator forward) or a
//! [`PageFollower`] (page operations), from which the next statement begins.
//!
//! The driver is the only long-lived resource; the root and every builder
//! borrow it for the duration of the chain and never own it. One chain per
//! driver session at a time; the crate does not arbitrate concurrent chains
//! over one session.
//!
//! # Example
//!
//! ```ignore
//! using(&driver)
//!     .open("https://example.com/login")
//!     .await?
//!     .then()
//!     .verify_page()
//!     .title_starts_with("Login")
//!     .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::action::Action;
use crate::check::{ElementChecker, PageChecker};
use crate::driver::{Driver, LogEntry};
use crate::error::Result;
use crate::locator::Locator;
use crate::select::{FromLocator, TagSelector};

// ============================================================================
// Entry Point
// ============================================================================

/// Starts a fluent chain over a borrowed driver session.
#[inline]
pub fn using<D: Driver>(driver: &D) -> Fluent<'_, D> {
    Fluent { driver }
}

// ============================================================================
// Fluent
// ============================================================================

/// The chain root: a copyable handle over the shared driver.
///
/// Every builder created from this root carries the same borrowed driver;
/// nothing else is shared between statements.
pub struct Fluent<'d, D> {
    pub(crate) driver: &'d D,
}

impl<D> Copy for Fluent<'_, D> {}

impl<D> Clone for Fluent<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> fmt::Debug for Fluent<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fluent").finish_non_exhaustive()
    }
}

// ============================================================================
// Fluent - Builders
// ============================================================================

impl<'d, D: Driver> Fluent<'d, D> {
    /// Starts selecting an element for an arbitrary terminal type.
    ///
    /// The generic factory behind [`Fluent::verify_element`] and
    /// [`Fluent::perform_on`]; any [`FromLocator`] implementor composes the
    /// same way.
    #[must_use]
    pub fn select_element_for<T: FromLocator<'d, D>>(self) -> TagSelector<'d, D, T> {
        TagSelector::new(self)
    }

    /// Starts an element assertion, selecting the element by tag and
    /// attribute.
    #[must_use]
    pub fn verify_element(self) -> TagSelector<'d, D, ElementChecker<'d, D>> {
        self.select_element_for()
    }

    /// Starts an element assertion on a pre-built locator.
    #[must_use]
    pub fn verify_element_at(self, locator: impl Into<Locator>) -> ElementChecker<'d, D> {
        ElementChecker::from_locator(self, locator.into())
    }

    /// Starts a whole-page assertion.
    #[must_use]
    pub fn verify_page(self) -> PageChecker<'d, D> {
        PageChecker::new(self)
    }

    /// Starts an interaction, selecting the element by tag and attribute.
    #[must_use]
    pub fn perform_on(self) -> TagSelector<'d, D, Action<'d, D>> {
        self.select_element_for()
    }

    /// Starts an interaction on a pre-built locator.
    #[must_use]
    pub fn perform_on_at(self, locator: impl Into<Locator>) -> Action<'d, D> {
        Action::from_locator(self, locator.into())
    }
}

// ============================================================================
// Fluent - Session Operations
// ============================================================================

impl<'d, D: Driver> Fluent<'d, D> {
    /// Navigates to a URL.
    ///
    /// # Errors
    ///
    /// Propagates driver navigation failures unchanged.
    pub async fn open(self, url: &str) -> Result<PageFollower<'d, D>> {
        debug!(url = %url, "opening");
        self.driver.navigate(url).await?;
        Ok(PageFollower::new(self))
    }

    /// Sleeps for a fixed delay, then continues the chain.
    pub async fn pause(self, delay: Duration) -> PageFollower<'d, D> {
        debug!(delay_ms = delay.as_millis() as u64, "pausing");
        sleep(delay).await;
        PageFollower::new(self)
    }

    /// Sleeps for a fixed delay unless the cancellation signal fires first.
    ///
    /// Returns [`PauseOutcome::Cancelled`] if `cancel` completed before the
    /// delay elapsed, [`PauseOutcome::Completed`] otherwise. The chain root
    /// is `Copy`, so either way the caller can continue from it.
    pub async fn pause_with_signal<C>(self, delay: Duration, cancel: C) -> PauseOutcome
    where
        C: Future<Output = ()>,
    {
        debug!(delay_ms = delay.as_millis() as u64, "pausing, cancellable");
        tokio::select! {
            () = sleep(delay) => PauseOutcome::Completed,
            () = cancel => {
                debug!("pause cancelled");
                PauseOutcome::Cancelled
            }
        }
    }

    /// Maximizes the browser window.
    ///
    /// # Errors
    ///
    /// Propagates driver failures unchanged.
    pub async fn maximize_window(self) -> Result<PageFollower<'d, D>> {
        self.driver.maximize_window().await?;
        Ok(PageFollower::new(self))
    }

    /// Moves the window to the origin and resizes it to the given viewport.
    ///
    /// # Errors
    ///
    /// Propagates driver failures unchanged.
    pub async fn set_viewport(self, width: u32, height: u32) -> Result<PageFollower<'d, D>> {
        debug!(width, height, "setting viewport");
        self.driver.set_window_position(0, 0).await?;
        self.driver.set_window_size(width, height).await?;
        Ok(PageFollower::new(self))
    }

    /// Fetches the browser log channel, unprocessed.
    ///
    /// # Errors
    ///
    /// Propagates driver failures unchanged.
    pub async fn fetch_browser_logs(self) -> Result<Vec<LogEntry>> {
        self.driver.fetch_logs("browser").await
    }
}

// ============================================================================
// PauseOutcome
// ============================================================================

/// How a cancellable pause ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PauseOutcome {
    /// The full delay elapsed.
    Completed,
    /// The cancellation signal fired before the delay elapsed.
    Cancelled,
}

impl PauseOutcome {
    /// Returns `true` if the full delay elapsed.
    #[inline]
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` if the pause was cut short.
    #[inline]
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// ============================================================================
// PageFollower
// ============================================================================

/// Continuation token returned by page-level terminal operations.
#[derive(Debug)]
pub struct PageFollower<'d, D> {
    chain: Fluent<'d, D>,
}

impl<'d, D: Driver> PageFollower<'d, D> {
    pub(crate) fn new(chain: Fluent<'d, D>) -> Self {
        Self { chain }
    }

    /// Returns to the chain root.
    #[inline]
    #[must_use]
    pub fn then(self) -> Fluent<'d, D> {
        self.chain
    }

    /// Emits a progress note, then returns to the chain root.
    #[must_use]
    pub fn then_noting(self, note: &str) -> Fluent<'d, D> {
        info!(note = %note, "chain");
        self.chain
    }
}

// ============================================================================
// Follower
// ============================================================================

/// Continuation token returned by element-level terminal operations.
///
/// Carries the just-resolved locator so a follow-up action can reuse it
/// without re-selecting.
#[derive(Debug)]
pub struct Follower<'d, D> {
    chain: Fluent<'d, D>,
    locator: Locator,
}

impl<'d, D: Driver> Follower<'d, D> {
    pub(crate) fn new(chain: Fluent<'d, D>, locator: Locator) -> Self {
        Self { chain, locator }
    }

    /// Returns the locator the preceding operation resolved.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Returns to the chain root.
    #[inline]
    #[must_use]
    pub fn then(self) -> Fluent<'d, D> {
        self.chain
    }

    /// Emits a progress note, then returns to the chain root.
    #[must_use]
    pub fn then_noting(self, note: &str) -> Fluent<'d, D> {
        info!(note = %note, "chain");
        self.chain
    }

    /// Starts an interaction bound to the same locator.
    #[must_use]
    pub fn so(self) -> Action<'d, D> {
        Action::from_locator(self.chain, self.locator)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Instant;

    use crate::driver::LogLevel;
    use crate::fake::{ElementState, FakeDriver, init_tracing};
    use crate::wait::WaitConfig;

    fn quick() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(200), Duration::from_millis(20))
    }

    #[tokio::test]
    async fn test_open_navigates_and_continues() {
        let driver = FakeDriver::new();

        let chain = using(&driver)
            .open("https://example.com/login")
            .await
            .unwrap()
            .then();

        assert_eq!(driver.navigations(), vec!["https://example.com/login"]);
        // Root stays usable after the follower hands it back.
        let _ = chain.verify_page();
    }

    #[tokio::test]
    async fn test_end_to_end_display_then_send_keys() {
        init_tracing();
        let driver = FakeDriver::new();
        driver.insert_element(
            "//input[@id='q']",
            ElementState::displayed().with_attribute("type", "search"),
        );

        using(&driver)
            .verify_element()
            .tag("input")
            .with("id")
            .equal_to("q")
            .is_displayed()
            .await
            .unwrap()
            .so()
            .send_keys("x")
            .await
            .unwrap();

        let keys = driver.keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].0, "//input[@id='q']");
        assert_eq!(keys[0].2, "x");
    }

    #[tokio::test]
    async fn test_click_resolves_at_click_time() {
        let driver = FakeDriver::new();
        driver.insert_element("//button[@id='go']", ElementState::displayed().instance(1));

        let follower = using(&driver)
            .verify_element_at("//button[@id='go']")
            .with_wait(quick())
            .is_displayed()
            .await
            .unwrap();

        // The DOM node is replaced between the check and the click.
        driver.insert_element("//button[@id='go']", ElementState::displayed().instance(2));

        follower.so().click().await.unwrap();

        assert_eq!(driver.clicks(), vec![("//button[@id='go']".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_pause_completes() {
        let driver = FakeDriver::new();
        let started = Instant::now();

        let _ = using(&driver).pause(Duration::from_millis(40)).await.then();

        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_pause_with_signal_completes_without_cancel() {
        let driver = FakeDriver::new();

        let outcome = using(&driver)
            .pause_with_signal(Duration::from_millis(20), std::future::pending())
            .await;

        assert!(outcome.is_completed());
    }

    #[tokio::test]
    async fn test_pause_with_signal_reports_cancellation() {
        let driver = FakeDriver::new();
        let started = Instant::now();

        let outcome = using(&driver)
            .pause_with_signal(Duration::from_secs(30), async {
                sleep(Duration::from_millis(20)).await;
            })
            .await;

        assert!(outcome.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_window_operations_delegate() {
        let driver = FakeDriver::new();
        let chain = using(&driver);

        let _ = chain.maximize_window().await.unwrap();
        let _ = chain.set_viewport(1920, 1080).await.unwrap();

        assert_eq!(
            driver.window_ops(),
            vec!["maximize", "position 0,0", "size 1920x1080"]
        );
    }

    #[tokio::test]
    async fn test_fetch_browser_logs_passes_entries_through() {
        let driver = FakeDriver::new();
        driver.push_log(LogEntry::new(LogLevel::Error, "boom", 42));
        driver.push_log(LogEntry::new(LogLevel::Info, "loaded", 43));

        let logs = using(&driver).fetch_browser_logs().await.unwrap();

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "boom");
        assert_eq!(logs[1].level, LogLevel::Info);
        assert_eq!(driver.log_channels(), vec!["browser"]);
    }

    #[tokio::test]
    async fn test_then_noting_returns_root() {
        let driver = FakeDriver::new();
        driver.set_title("Dashboard");

        let chain = using(&driver)
            .open("https://example.com")
            .await
            .unwrap()
            .then_noting("landed on the dashboard");

        assert!(
            chain
                .verify_page()
                .with_wait(quick())
                .title_starts_with("Dash")
                .await
                .is_ok()
        );
    }
}
