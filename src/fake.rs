//! In-memory fake driver for unit tests.
//!
//! Backs the builder tests with a scriptable page: elements are inserted and
//! replaced under their locator expression, and every resolution, click and
//! keystroke is recorded for assertions. Replacing an element bumps its
//! instance number; handles resolved against the old instance report
//! staleness on their next read, which is how the stale-absorption paths are
//! exercised.

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::driver::{Driver, ElementHandle, LogEntry};
use crate::error::{Error, Result};
use crate::locator::Locator;

// ============================================================================
// Test Logging
// ============================================================================

/// Installs a test subscriber once; later calls are no-ops.
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// ElementState
// ============================================================================

/// Scripted state of one fake element.
#[derive(Debug, Clone)]
pub(crate) struct ElementState {
    instance: u32,
    displayed: bool,
    text: Option<String>,
    attributes: HashMap<String, String>,
}

impl ElementState {
    /// A visible element with no text or attributes.
    pub fn displayed() -> Self {
        Self {
            instance: 1,
            displayed: true,
            text: None,
            attributes: HashMap::new(),
        }
    }

    /// An element present in the DOM but not rendered.
    pub fn hidden() -> Self {
        Self {
            displayed: false,
            ..Self::displayed()
        }
    }

    /// Sets the instance number distinguishing DOM node replacements.
    pub fn instance(mut self, instance: u32) -> Self {
        self.instance = instance;
        self
    }

    /// Sets the rendered text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// FakeDriver
// ============================================================================

#[derive(Debug, Default)]
struct PageState {
    title: String,
    elements: HashMap<String, ElementState>,
    logs: Vec<LogEntry>,
    navigations: Vec<String>,
    window_ops: Vec<String>,
    log_channels: Vec<String>,
    clicks: Vec<(String, u32)>,
    keys: Vec<(String, u32, String)>,
    finds: u32,
}

/// Scriptable in-memory [`Driver`] implementation.
///
/// Clones share the same page state, so a test can hand a clone to a spawned
/// task that mutates the page while the chain under test is polling.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeDriver {
    state: Arc<Mutex<PageState>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().title = title.into();
    }

    /// Inserts or replaces the element stored under `xpath`.
    pub fn insert_element(&self, xpath: &str, element: ElementState) {
        self.state.lock().elements.insert(xpath.to_string(), element);
    }

    pub fn push_log(&self, entry: LogEntry) {
        self.state.lock().logs.push(entry);
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }

    pub fn window_ops(&self) -> Vec<String> {
        self.state.lock().window_ops.clone()
    }

    pub fn log_channels(&self) -> Vec<String> {
        self.state.lock().log_channels.clone()
    }

    /// Clicks recorded so far, as (locator expression, element instance).
    pub fn clicks(&self) -> Vec<(String, u32)> {
        self.state.lock().clicks.clone()
    }

    /// Keystrokes recorded so far, as (locator expression, instance, keys).
    pub fn keys(&self) -> Vec<(String, u32, String)> {
        self.state.lock().keys.clone()
    }

    /// Number of `find_element` calls served, successful or not.
    pub fn find_count(&self) -> u32 {
        self.state.lock().finds
    }
}

#[async_trait]
impl Driver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.lock().navigations.push(url.to_string());
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> Result<Self::Element> {
        let mut state = self.state.lock();
        state.finds += 1;
        let xpath = locator.expression().to_string();
        match state.elements.get(&xpath) {
            Some(element) => Ok(FakeElement {
                state: Arc::clone(&self.state),
                xpath,
                instance: element.instance,
            }),
            None => Err(Error::element_not_found(xpath)),
        }
    }

    async fn current_title(&self) -> Result<String> {
        Ok(self.state.lock().title.clone())
    }

    async fn maximize_window(&self) -> Result<()> {
        self.state.lock().window_ops.push("maximize".to_string());
        Ok(())
    }

    async fn set_window_size(&self, width: u32, height: u32) -> Result<()> {
        self.state
            .lock()
            .window_ops
            .push(format!("size {width}x{height}"));
        Ok(())
    }

    async fn set_window_position(&self, x: i32, y: i32) -> Result<()> {
        self.state
            .lock()
            .window_ops
            .push(format!("position {x},{y}"));
        Ok(())
    }

    async fn fetch_logs(&self, channel: &str) -> Result<Vec<LogEntry>> {
        let mut state = self.state.lock();
        state.log_channels.push(channel.to_string());
        Ok(state.logs.clone())
    }
}

// ============================================================================
// FakeElement
// ============================================================================

/// Handle bound to the element instance that was current at resolve time.
#[derive(Debug)]
pub(crate) struct FakeElement {
    state: Arc<Mutex<PageState>>,
    xpath: String,
    instance: u32,
}

impl FakeElement {
    /// Reads the element's current state, failing if the node was replaced
    /// or removed since this handle resolved.
    fn current(&self) -> Result<ElementState> {
        let state = self.state.lock();
        match state.elements.get(&self.xpath) {
            Some(element) if element.instance == self.instance => Ok(element.clone()),
            _ => Err(Error::stale_element(self.xpath.clone())),
        }
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.current()?.displayed)
    }

    async fn text(&self) -> Result<Option<String>> {
        Ok(self.current()?.text)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.current()?.attributes.get(name).cloned())
    }

    async fn click(&self) -> Result<()> {
        self.current()?;
        self.state
            .lock()
            .clicks
            .push((self.xpath.clone(), self.instance));
        Ok(())
    }

    async fn send_keys(&self, keys: &str) -> Result<()> {
        self.current()?;
        self.state
            .lock()
            .keys
            .push((self.xpath.clone(), self.instance, keys.to_string()));
        Ok(())
    }
}
