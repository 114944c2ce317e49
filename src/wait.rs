//! Wait configuration and the poll-until-true loop.
//!
//! Every assertion builder funnels its predicate through [`poll_until`]: the
//! predicate is evaluated against live page state, and if it is not yet
//! satisfied the loop sleeps one poll interval and tries again until the
//! configured timeout elapses. Transient element errors (missing, stale) are
//! treated as "not yet satisfied" and absorbed; they never reach the caller.
//!
//! The loop is an internal sleep-and-retry; no background task is spawned
//! and the awaiting chain makes no progress until the condition resolves.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::trace;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for polled conditions (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between condition evaluations (250ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

// ============================================================================
// WaitConfig
// ============================================================================

/// Timeout and poll interval for one polled condition.
///
/// Each assertion builder carries its own copy; overriding the timeout on
/// one builder has no effect on any other, and no effect on a wait that has
/// already started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often the condition is re-evaluated.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a wait configuration.
    #[inline]
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Returns this configuration with the timeout replaced.
    #[inline]
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

// ============================================================================
// poll_until
// ============================================================================

/// Repeatedly evaluates `predicate` until it returns `Ok(true)` or the
/// configured timeout elapses.
///
/// The predicate is always evaluated at least once. Transient errors
/// ([`Error::is_transient`]) are retried like an unsatisfied condition;
/// any other error is surfaced immediately.
///
/// # Errors
///
/// [`Error::Timeout`] carrying `condition` once the deadline passes; the
/// failure is raised no earlier than the configured timeout and no later
/// than one poll interval after it.
///
/// # Example
///
/// ```ignore
/// poll_until(WaitConfig::default(), "element is displayed", move || async move {
///     let element = driver.find_element(&locator).await?;
///     element.is_displayed().await
/// })
/// .await?;
/// ```
pub async fn poll_until<F, Fut>(config: WaitConfig, condition: &str, mut predicate: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let started = Instant::now();

    loop {
        match predicate().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) if err.is_transient() => {
                trace!(condition, error = %err, "transient read while polling, retrying");
            }
            Err(err) => return Err(err),
        }

        if started.elapsed() >= config.timeout {
            return Err(Error::timeout(condition, config.timeout));
        }

        sleep(config.poll_interval).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
