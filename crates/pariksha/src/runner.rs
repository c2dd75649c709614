//! Retrying test execution against the live translator page.
//!
//! A [`TranslatorSession`] owns one page driver exclusively; all waits are
//! cooperative suspensions on that single control flow. The run loop is an
//! explicit bounded loop with an attempt counter - a full page reload is the
//! hard reset point between attempts, so no attempt depends on the prior
//! attempt's in-page state.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::HarnessConfig;
use crate::controls::find_clear_control;
use crate::diagnostics::Diagnostics;
use crate::driver::PageDriver;
use crate::locator::{input_candidates, locate};
use crate::matcher::{Located, Matcher};
use crate::output::read_output;
use crate::result::{HarnessError, HarnessResult};

/// Selector for transient loading indicators awaited during setup
const LOADING_INDICATORS: &str = ".loading, [aria-busy=\"true\"]";

/// Poll interval while waiting for loading indicators
const LOADING_POLL_MS: u64 = 250;

/// What the rendered output must look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expectation {
    /// Output must equal this string exactly
    Exact(String),
    /// Output must contain every one of these substrings
    ContainsAll(Vec<String>),
}

impl Expectation {
    /// Expect the output to equal `text` exactly
    #[must_use]
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    /// Expect the output to contain `text`
    #[must_use]
    pub fn contains(text: impl Into<String>) -> Self {
        Self::ContainsAll(vec![text.into()])
    }

    /// Expect the output to contain every item
    #[must_use]
    pub fn contains_all<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ContainsAll(items.into_iter().map(Into::into).collect())
    }

    /// Check `actual` against this expectation
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::AssertionMismatch`] when the check fails.
    pub fn check(&self, test_id: &str, actual: &str) -> HarnessResult<()> {
        let holds = match self {
            Self::Exact(expected) => actual == expected,
            Self::ContainsAll(items) => items.iter().all(|item| actual.contains(item.as_str())),
        };
        if holds {
            Ok(())
        } else {
            Err(HarnessError::AssertionMismatch {
                test_id: test_id.to_string(),
                expected: self.to_string(),
                actual: actual.to_string(),
            })
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(text) => write!(f, "exactly {text:?}"),
            Self::ContainsAll(items) => {
                write!(f, "containing ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " and ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                Ok(())
            }
        }
    }
}

/// One declarative translation test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationCase {
    /// Stable case id (e.g. `Pos_Fun_0001`)
    pub id: String,
    /// Human-readable description
    pub description: String,
    /// Singlish text typed into the input control
    pub input: String,
    /// Expected rendered output
    pub expected: Expectation,
}

impl TranslationCase {
    /// Create a case
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        input: impl Into<String>,
        expected: Expectation,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            input: input.into(),
            expected,
        }
    }
}

/// Captured result of running one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Case id
    pub id: String,
    /// Whether the case passed
    pub passed: bool,
    /// Input that was typed
    pub input: String,
    /// Rendered expectation
    pub expected: String,
    /// Output actually read from the page (empty if never read)
    pub actual: String,
    /// Attempts consumed, including the final one
    pub attempts: u32,
    /// Terminal error when the case failed
    pub error: Option<String>,
}

/// How the input ended up cleared
#[derive(Debug, Clone)]
pub enum ClearMethod {
    /// A discovered clear control was clicked
    Button(Located),
    /// No control was found; the input was cleared directly
    Manual,
}

impl ClearMethod {
    /// Short name for logs and reports
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Button(_) => "button",
            Self::Manual => "manual",
        }
    }
}

/// One exclusive page session against the translator
#[derive(Debug)]
pub struct TranslatorSession<D> {
    driver: D,
    config: HarnessConfig,
    diagnostics: Diagnostics,
}

impl<D: PageDriver> TranslatorSession<D> {
    /// Create a session over an owned driver
    #[must_use]
    pub fn new(driver: D, config: HarnessConfig) -> Self {
        let diagnostics = Diagnostics::new(config.artifact_dir.clone());
        Self {
            driver,
            config,
            diagnostics,
        }
    }

    /// The underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// The session configuration
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Navigate to the translator and wait for the page to become usable.
    ///
    /// Waits a fixed load settle, then polls (bounded, best-effort) for any
    /// loading indicator to disappear; an indicator that never goes away is
    /// ignored rather than failing setup.
    pub async fn open(&mut self) -> HarnessResult<()> {
        let url = self.config.base_url.clone();
        self.driver.navigate(&url).await?;
        tokio::time::sleep(self.config.load_settle).await;
        self.await_loading_indicators().await;
        Ok(())
    }

    /// Reload the page and wait the reload settle (hard reset between attempts)
    pub async fn reload(&mut self) -> HarnessResult<()> {
        self.driver.reload().await?;
        tokio::time::sleep(self.config.reload_settle).await;
        self.await_loading_indicators().await;
        Ok(())
    }

    /// Locate the translator's input control
    pub async fn locate_input(&self) -> HarnessResult<Located> {
        locate(
            &self.driver,
            "input field",
            &input_candidates(),
            self.config.focus_delay,
            &self.diagnostics,
        )
        .await
    }

    /// Fill the input control with `text`
    pub async fn fill_input(&self, input: &Located, text: &str) -> HarnessResult<()> {
        self.driver.fill(input.matcher(), text).await
    }

    /// Read the input control's current value (empty string when unreadable)
    pub async fn input_value(&self, input: &Located) -> HarnessResult<String> {
        Ok(self
            .driver
            .input_value(input.matcher())
            .await?
            .unwrap_or_default())
    }

    /// Clear the input, preferring a discovered clear control.
    ///
    /// Falls back to clearing through the input matcher when no control is
    /// found; reports which method was used.
    pub async fn clear_input(&self, input: &Located) -> HarnessResult<ClearMethod> {
        if let Some(control) = find_clear_control(&self.driver, &self.diagnostics).await {
            self.driver.click(control.matcher()).await?;
            tokio::time::sleep(self.config.post_clear_delay).await;
            return Ok(ClearMethod::Button(control));
        }
        self.driver.clear(input.matcher()).await?;
        tokio::time::sleep(self.config.post_clear_delay).await;
        Ok(ClearMethod::Manual)
    }

    /// Read the rendered translation (waits the output probe delay first)
    pub async fn read_output(&self) -> String {
        tokio::time::sleep(self.config.output_probe_delay).await;
        read_output(&self.driver, &self.diagnostics).await
    }

    /// Run one case with retries.
    ///
    /// The locate → clear → fill → settle → read → assert sequence runs at
    /// most `max_retries` times, with a full page reload between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ExhaustedRetries`] wrapping the last attempt's
    /// error once the bound is hit. A reload failure propagates immediately.
    pub async fn run(&mut self, case: &TranslationCase) -> HarnessResult<TestOutcome> {
        let max_attempts = self.config.max_retries.max(1);

        let mut attempt = 1;
        loop {
            match self.attempt(case).await {
                Ok(actual) => {
                    info!(id = %case.id, attempt, "case passed");
                    return Ok(TestOutcome {
                        id: case.id.clone(),
                        passed: true,
                        input: case.input.clone(),
                        expected: case.expected.to_string(),
                        actual,
                        attempts: attempt,
                        error: None,
                    });
                }
                Err(e) => {
                    let remaining = max_attempts - attempt;
                    warn!(id = %case.id, attempt, remaining, error = %e, "attempt failed");
                    if remaining == 0 {
                        return Err(HarnessError::ExhaustedRetries {
                            test_id: case.id.clone(),
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }
                    self.reload().await?;
                    attempt += 1;
                }
            }
        }
    }

    /// Run one case and fold the terminal error into a reportable outcome
    pub async fn run_outcome(&mut self, case: &TranslationCase) -> TestOutcome {
        match self.run(case).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let (attempts, actual, error) = match &e {
                    HarnessError::ExhaustedRetries { attempts, last, .. } => {
                        let actual = match last.as_ref() {
                            HarnessError::AssertionMismatch { actual, .. } => actual.clone(),
                            _ => String::new(),
                        };
                        (*attempts, actual, e.to_string())
                    }
                    _ => (0, String::new(), e.to_string()),
                };
                TestOutcome {
                    id: case.id.clone(),
                    passed: false,
                    input: case.input.clone(),
                    expected: case.expected.to_string(),
                    actual,
                    attempts,
                    error: Some(error),
                }
            }
        }
    }

    /// One locate → clear → fill → settle → read → assert pass
    async fn attempt(&self, case: &TranslationCase) -> HarnessResult<String> {
        let input = self.locate_input().await?;

        self.driver.clear(input.matcher()).await?;
        tokio::time::sleep(self.config.post_clear_delay).await;

        self.driver.fill(input.matcher(), &case.input).await?;
        tokio::time::sleep(self.config.settle).await;

        let actual = self.read_output().await;
        info!(id = %case.id, actual = %actual, "output read");

        case.expected.check(&case.id, &actual)?;
        Ok(actual)
    }

    /// Poll until no loading indicator is visible, bounded by the configured
    /// timeout. Best-effort: timeouts and driver errors are ignored.
    async fn await_loading_indicators(&self) {
        let matcher = Matcher::css(LOADING_INDICATORS);
        let deadline = tokio::time::Instant::now() + self.config.loading_indicator_timeout;
        loop {
            match self.driver.is_visible(&matcher).await {
                Ok(false) | Err(_) => return,
                Ok(true) => {}
            }
            if tokio::time::Instant::now() >= deadline {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(LOADING_POLL_MS)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{FakeDriver, FakeElement, PageState};
    use crate::output::NO_OUTPUT;

    fn fast_config() -> HarnessConfig {
        HarnessConfig::new()
            .with_artifact_dir(std::env::temp_dir().join("pariksha-tests"))
            .without_waits()
    }

    fn working_page(output_text: &str) -> PageState {
        PageState::new()
            .with_element(
                &Matcher::css("textarea"),
                FakeElement::visible().with_value(""),
            )
            .with_element(
                &Matcher::css("div.output"),
                FakeElement::visible().with_text(output_text),
            )
    }

    fn greeting_case() -> TranslationCase {
        TranslationCase::new(
            "Pos_Fun_0001",
            "Convert short daily greeting",
            "suba udhaeesanak",
            Expectation::contains("සුබ උදෑසනක්"),
        )
    }

    mod expectations {
        use super::*;

        #[test]
        fn exact_requires_equality() {
            let exp = Expectation::exact("ථx මචන්!");
            assert!(exp.check("Neg_Fun_0001", "ථx මචන්!").is_ok());
            assert!(exp.check("Neg_Fun_0001", "ථx මචන්! ").is_err());
        }

        #[test]
        fn contains_all_requires_every_item() {
            let exp = Expectation::contains_all(["අපි හෙට Kandy යන්න හදනවා", "WiFi"]);
            assert!(exp
                .check("Pos_Fun_0002", "අපි හෙට Kandy යන්න හදනවා ... WiFi සහ parking")
                .is_ok());
            assert!(exp.check("Pos_Fun_0002", "අපි හෙට Kandy යන්න හදනවා").is_err());
        }

        #[test]
        fn mismatch_captures_expected_and_actual() {
            let err = Expectation::contains("සුබ")
                .check("Pos_Fun_0001", NO_OUTPUT)
                .unwrap_err();
            match err {
                HarnessError::AssertionMismatch {
                    test_id,
                    expected,
                    actual,
                } => {
                    assert_eq!(test_id, "Pos_Fun_0001");
                    assert!(expected.contains("සුබ"));
                    assert_eq!(actual, NO_OUTPUT);
                }
                other => panic!("expected AssertionMismatch, got {other}"),
            }
        }

        #[test]
        fn display_renders_both_shapes() {
            assert_eq!(Expectation::exact("x").to_string(), "exactly \"x\"");
            assert_eq!(
                Expectation::contains_all(["a", "b"]).to_string(),
                "containing \"a\" and \"b\""
            );
        }
    }

    #[tokio::test]
    async fn success_on_first_attempt_does_not_reload() {
        let driver = FakeDriver::new(working_page("සුබ උදෑසනක්"));
        let mut session = TranslatorSession::new(driver, fast_config());

        let outcome = session.run(&greeting_case()).await.unwrap();

        assert!(outcome.passed);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.actual, "සුබ උදෑසනක්");
        assert_eq!(session.driver().call_count("reload"), 0);
    }

    #[tokio::test]
    async fn failing_attempts_reload_until_success() {
        // Two broken page states (no input control), then a working one.
        let driver = FakeDriver::with_states(vec![
            PageState::new(),
            PageState::new(),
            working_page("සුබ උදෑසනක්"),
        ]);
        let mut session = TranslatorSession::new(driver, fast_config());

        let outcome = session.run(&greeting_case()).await.unwrap();

        assert!(outcome.passed);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(session.driver().call_count("reload"), 2);
    }

    #[tokio::test]
    async fn retry_bound_is_enforced() {
        let driver = FakeDriver::new(PageState::new());
        let mut session = TranslatorSession::new(driver, fast_config());

        let err = session.run(&greeting_case()).await.unwrap_err();

        match err {
            HarnessError::ExhaustedRetries {
                test_id,
                attempts,
                last,
            } => {
                assert_eq!(test_id, "Pos_Fun_0001");
                assert_eq!(attempts, 3);
                assert!(matches!(*last, HarnessError::NotFound { .. }));
            }
            other => panic!("expected ExhaustedRetries, got {other}"),
        }
        // Reloads happen between attempts, not after the final failure.
        assert_eq!(session.driver().call_count("reload"), 2);
    }

    #[tokio::test]
    async fn mismatched_output_is_retried_then_raised() {
        let driver = FakeDriver::new(working_page("වෙනත් දෙයක්"));
        let config = fast_config().with_max_retries(2);
        let mut session = TranslatorSession::new(driver, config);

        let err = session.run(&greeting_case()).await.unwrap_err();

        match err {
            HarnessError::ExhaustedRetries { attempts, last, .. } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, HarnessError::AssertionMismatch { .. }));
            }
            other => panic!("expected ExhaustedRetries, got {other}"),
        }
    }

    #[tokio::test]
    async fn run_outcome_folds_failure_into_report() {
        let driver = FakeDriver::new(working_page("වෙනත් දෙයක්"));
        let config = fast_config().with_max_retries(1);
        let mut session = TranslatorSession::new(driver, config);

        let outcome = session.run_outcome(&greeting_case()).await;

        assert!(!outcome.passed);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.actual, "වෙනත් දෙයක්");
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn clearing_then_reading_yields_empty_string() {
        let driver = FakeDriver::new(working_page(""));
        let session = TranslatorSession::new(driver, fast_config());

        let input = session.locate_input().await.unwrap();
        session.fill_input(&input, "mama gedhara yanavaa").await.unwrap();
        assert_eq!(
            session.input_value(&input).await.unwrap(),
            "mama gedhara yanavaa"
        );

        let method = session.clear_input(&input).await.unwrap();
        assert!(matches!(method, ClearMethod::Manual));
        assert_eq!(session.input_value(&input).await.unwrap(), "");

        // New text is accepted after the clear.
        session.fill_input(&input, "api yamu").await.unwrap();
        assert_eq!(session.input_value(&input).await.unwrap(), "api yamu");
    }

    #[tokio::test]
    async fn clear_prefers_discovered_button() {
        let page = working_page("").with_element(
            &Matcher::with_text("button", "Clear"),
            FakeElement::visible(),
        );
        let driver = FakeDriver::new(page);
        let session = TranslatorSession::new(driver, fast_config());

        let input = session.locate_input().await.unwrap();
        let method = session.clear_input(&input).await.unwrap();

        assert!(matches!(method, ClearMethod::Button(_)));
        assert_eq!(method.name(), "button");
        assert!(session.driver().was_called("click:button:text(Clear)"));
    }

    #[tokio::test]
    async fn open_navigates_and_tolerates_missing_loading_indicator() {
        let driver = FakeDriver::new(working_page(""));
        let mut session = TranslatorSession::new(driver, fast_config());

        session.open().await.unwrap();
        assert!(session
            .driver()
            .was_called("navigate:https://www.swifttranslator.com/"));
    }
}
