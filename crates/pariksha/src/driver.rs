//! Abstract page-automation trait.
//!
//! The harness consumes exactly these primitives: navigation, DOM
//! querying/visibility checks, element interaction (click, fill, clear),
//! text/attribute/value extraction, and screenshot capture. The trait keeps
//! the probing logic independent of the transport so heuristics can be
//! exercised against a scripted page in unit tests.
//!
//! # Implementations
//!
//! - `CdpDriver` (feature `browser`) - real Chrome DevTools Protocol via
//!   chromiumoxide
//! - [`FakeDriver`] - scripted page states for unit testing

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::matcher::Matcher;
use crate::result::{HarnessError, HarnessResult};

/// Observable facts about one element, used by scoring heuristics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFacts {
    /// Trimmed text content
    #[serde(default)]
    pub text: String,
    /// `aria-label` attribute, if any
    #[serde(default)]
    pub aria_label: Option<String>,
    /// `title` attribute, if any
    #[serde(default)]
    pub title: Option<String>,
    /// `class` attribute, if any
    #[serde(default)]
    pub class_name: Option<String>,
    /// Whether the element is rendered and visible
    #[serde(default)]
    pub visible: bool,
}

/// Browser-automation primitives consumed by the harness
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&mut self, url: &str) -> HarnessResult<()>;

    /// Reload the current page (hard reset point between attempts)
    async fn reload(&mut self) -> HarnessResult<()>;

    /// Number of elements matching
    async fn count(&self, matcher: &Matcher) -> HarnessResult<usize>;

    /// Whether the first match exists and is visible
    async fn is_visible(&self, matcher: &Matcher) -> HarnessResult<bool>;

    /// Forced click on the first match (used as a focusing interaction)
    async fn click(&self, matcher: &Matcher) -> HarnessResult<()>;

    /// Replace the first match's content with `text`, firing input events
    async fn fill(&self, matcher: &Matcher, text: &str) -> HarnessResult<()>;

    /// Clear the first match's content, firing input events
    async fn clear(&self, matcher: &Matcher) -> HarnessResult<()>;

    /// Text content of the first match (`None` when nothing matches)
    async fn text_content(&self, matcher: &Matcher) -> HarnessResult<Option<String>>;

    /// An attribute of the first match
    async fn attribute(&self, matcher: &Matcher, name: &str) -> HarnessResult<Option<String>>;

    /// Live `value` property of the first match (inputs and textareas)
    async fn input_value(&self, matcher: &Matcher) -> HarnessResult<Option<String>>;

    /// Facts about every match, in DOM order
    async fn describe_all(&self, matcher: &Matcher) -> HarnessResult<Vec<ElementFacts>>;

    /// Inner text of the whole document body
    async fn body_text(&self) -> HarnessResult<String>;

    /// Full-page PNG screenshot
    async fn screenshot(&self) -> HarnessResult<Vec<u8>>;
}

// ============================================================================
// Scripted driver for unit tests
// ============================================================================

/// One scripted element, keyed by the matcher that finds it
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    /// How many elements the matcher reports
    pub count: usize,
    /// Whether the first match is visible
    pub visible: bool,
    /// Text content
    pub text: Option<String>,
    /// Live input value
    pub value: Option<String>,
    /// Attributes by name
    pub attrs: HashMap<String, String>,
}

impl FakeElement {
    /// A single visible element
    #[must_use]
    pub fn visible() -> Self {
        Self {
            count: 1,
            visible: true,
            ..Self::default()
        }
    }

    /// A single element that exists but is not visible
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            count: 1,
            visible: false,
            ..Self::default()
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the live input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the reported match count
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// One scripted page state
#[derive(Debug, Clone, Default)]
pub struct PageState {
    elements: HashMap<String, FakeElement>,
    described: HashMap<String, Vec<ElementFacts>>,
    body: String,
    screenshot: Vec<u8>,
}

impl PageState {
    /// An empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an element for a matcher
    #[must_use]
    pub fn with_element(mut self, matcher: &Matcher, element: FakeElement) -> Self {
        self.elements.insert(matcher.to_string(), element);
        self
    }

    /// Script the facts returned by [`PageDriver::describe_all`] for a matcher
    #[must_use]
    pub fn with_described(mut self, matcher: &Matcher, facts: Vec<ElementFacts>) -> Self {
        self.described.insert(matcher.to_string(), facts);
        self
    }

    /// Script the document body text
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Script screenshot bytes
    #[must_use]
    pub fn with_screenshot(mut self, bytes: Vec<u8>) -> Self {
        self.screenshot = bytes;
        self
    }
}

#[derive(Debug, Default)]
struct FakeInner {
    states: Vec<PageState>,
    current: usize,
    calls: Vec<String>,
    fail_all: bool,
}

/// Scripted [`PageDriver`] for unit testing.
///
/// Holds a sequence of page states; [`PageDriver::reload`] advances to the
/// next state (the last state repeats), which models a page whose behavior
/// changes across retry attempts. Every interaction is recorded in a call
/// history for verification.
#[derive(Debug, Default)]
pub struct FakeDriver {
    inner: Mutex<FakeInner>,
}

impl FakeDriver {
    /// Driver with a single page state
    #[must_use]
    pub fn new(state: PageState) -> Self {
        Self::with_states(vec![state])
    }

    /// Driver whose state advances on each reload
    #[must_use]
    pub fn with_states(states: Vec<PageState>) -> Self {
        Self {
            inner: Mutex::new(FakeInner {
                states,
                ..FakeInner::default()
            }),
        }
    }

    /// Driver where every operation fails with a page error
    #[must_use]
    pub fn failing() -> Self {
        Self {
            inner: Mutex::new(FakeInner {
                states: vec![PageState::default()],
                fail_all: true,
                ..FakeInner::default()
            }),
        }
    }

    /// Recorded call history
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().expect("fake driver poisoned").calls.clone()
    }

    /// Whether a call with the given prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    /// Number of recorded calls with the given prefix
    #[must_use]
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn check_failing(&self, op: &str) -> HarnessResult<()> {
        if self.inner.lock().expect("fake driver poisoned").fail_all {
            Err(HarnessError::page(format!("scripted failure in {op}")))
        } else {
            Ok(())
        }
    }

    fn record(&self, call: String) {
        self.inner
            .lock()
            .expect("fake driver poisoned")
            .calls
            .push(call);
    }

    fn with_current<T>(&self, f: impl FnOnce(&PageState) -> T) -> T {
        let inner = self.inner.lock().expect("fake driver poisoned");
        if inner.states.is_empty() {
            return f(&PageState::default());
        }
        let idx = inner.current.min(inner.states.len() - 1);
        f(&inner.states[idx])
    }

    fn with_current_mut<T>(&self, f: impl FnOnce(&mut PageState) -> T) -> T {
        let mut inner = self.inner.lock().expect("fake driver poisoned");
        if inner.states.is_empty() {
            return f(&mut PageState::default());
        }
        let idx = inner.current.min(inner.states.len() - 1);
        f(&mut inner.states[idx])
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn navigate(&mut self, url: &str) -> HarnessResult<()> {
        self.check_failing("navigate")?;
        self.record(format!("navigate:{url}"));
        Ok(())
    }

    async fn reload(&mut self) -> HarnessResult<()> {
        self.check_failing("reload")?;
        self.record("reload".to_string());
        let mut inner = self.inner.lock().expect("fake driver poisoned");
        if inner.current + 1 < inner.states.len() {
            inner.current += 1;
        }
        Ok(())
    }

    async fn count(&self, matcher: &Matcher) -> HarnessResult<usize> {
        self.check_failing("count")?;
        Ok(self.with_current(|s| s.elements.get(&matcher.to_string()).map_or(0, |e| e.count)))
    }

    async fn is_visible(&self, matcher: &Matcher) -> HarnessResult<bool> {
        self.check_failing("is_visible")?;
        Ok(self.with_current(|s| {
            s.elements
                .get(&matcher.to_string())
                .is_some_and(|e| e.count > 0 && e.visible)
        }))
    }

    async fn click(&self, matcher: &Matcher) -> HarnessResult<()> {
        self.check_failing("click")?;
        self.record(format!("click:{matcher}"));
        Ok(())
    }

    async fn fill(&self, matcher: &Matcher, text: &str) -> HarnessResult<()> {
        self.check_failing("fill")?;
        self.record(format!("fill:{matcher}:{text}"));
        let owned = text.to_string();
        self.with_current_mut(|s| {
            if let Some(el) = s.elements.get_mut(&matcher.to_string()) {
                el.value = Some(owned);
            }
        });
        Ok(())
    }

    async fn clear(&self, matcher: &Matcher) -> HarnessResult<()> {
        self.check_failing("clear")?;
        self.record(format!("clear:{matcher}"));
        self.with_current_mut(|s| {
            if let Some(el) = s.elements.get_mut(&matcher.to_string()) {
                el.value = Some(String::new());
            }
        });
        Ok(())
    }

    async fn text_content(&self, matcher: &Matcher) -> HarnessResult<Option<String>> {
        self.check_failing("text_content")?;
        Ok(self.with_current(|s| {
            s.elements
                .get(&matcher.to_string())
                .and_then(|e| e.text.clone())
        }))
    }

    async fn attribute(&self, matcher: &Matcher, name: &str) -> HarnessResult<Option<String>> {
        self.check_failing("attribute")?;
        Ok(self.with_current(|s| {
            s.elements
                .get(&matcher.to_string())
                .and_then(|e| e.attrs.get(name).cloned())
        }))
    }

    async fn input_value(&self, matcher: &Matcher) -> HarnessResult<Option<String>> {
        self.check_failing("input_value")?;
        Ok(self.with_current(|s| {
            s.elements
                .get(&matcher.to_string())
                .and_then(|e| e.value.clone())
        }))
    }

    async fn describe_all(&self, matcher: &Matcher) -> HarnessResult<Vec<ElementFacts>> {
        self.check_failing("describe_all")?;
        Ok(self.with_current(|s| {
            s.described
                .get(&matcher.to_string())
                .cloned()
                .unwrap_or_default()
        }))
    }

    async fn body_text(&self) -> HarnessResult<String> {
        self.check_failing("body_text")?;
        Ok(self.with_current(|s| s.body.clone()))
    }

    async fn screenshot(&self) -> HarnessResult<Vec<u8>> {
        self.check_failing("screenshot")?;
        self.record("screenshot".to_string());
        Ok(self.with_current(|s| s.screenshot.clone()))
    }
}
