//! Harness configuration.

use std::path::PathBuf;
use std::time::Duration;

/// URL of the hosted translator
pub const DEFAULT_BASE_URL: &str = "https://www.swifttranslator.com/";

/// Default retry bound for a whole test sequence
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default settle interval after filling input (ms).
///
/// The target UI translates asynchronously, debounced client-side, and
/// exposes no completion signal; the harness waits a fixed interval instead.
pub const DEFAULT_SETTLE_MS: u64 = 1500;

/// Tuning knobs for one harness session.
///
/// All waits are configuration so a future readiness signal could replace
/// the fixed delays without touching the runner. Defaults mirror the timings
/// the live site has been observed to need.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Page to navigate to in setup
    pub base_url: String,
    /// Retry bound for the whole locate/fill/read/assert sequence
    pub max_retries: u32,
    /// Wait after filling input, before probing for output
    pub settle: Duration,
    /// Additional wait at the start of each output read
    pub output_probe_delay: Duration,
    /// Wait after clearing the input
    pub post_clear_delay: Duration,
    /// Wait after the focusing click on a located control
    pub focus_delay: Duration,
    /// Wait after the initial navigation
    pub load_settle: Duration,
    /// Wait after a retry reload
    pub reload_settle: Duration,
    /// How long to wait for loading indicators to disappear (best-effort)
    pub loading_indicator_timeout: Duration,
    /// Where diagnostic artifacts (screenshots) are written
    pub artifact_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            output_probe_delay: Duration::from_millis(1000),
            post_clear_delay: Duration::from_millis(200),
            focus_delay: Duration::from_millis(200),
            load_settle: Duration::from_millis(1000),
            reload_settle: Duration::from_millis(1000),
            loading_indicator_timeout: Duration::from_secs(5),
            artifact_dir: PathBuf::from("target/e2e-artifacts"),
        }
    }
}

impl HarnessConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the retry bound
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the settle interval
    #[must_use]
    pub const fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Set the output probe delay
    #[must_use]
    pub const fn with_output_probe_delay(mut self, delay: Duration) -> Self {
        self.output_probe_delay = delay;
        self
    }

    /// Set the artifact directory
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    /// Zero every wait. Intended for scripted-driver tests where real time
    /// adds nothing.
    #[must_use]
    pub const fn without_waits(mut self) -> Self {
        self.settle = Duration::ZERO;
        self.output_probe_delay = Duration::ZERO;
        self.post_clear_delay = Duration::ZERO;
        self.focus_delay = Duration::ZERO;
        self.load_settle = Duration::ZERO;
        self.reload_settle = Duration::ZERO;
        self.loading_indicator_timeout = Duration::ZERO;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_observed_site_timings() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.settle, Duration::from_millis(1500));
        assert_eq!(config.output_probe_delay, Duration::from_millis(1000));
    }

    #[test]
    fn builder_overrides() {
        let config = HarnessConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_max_retries(1)
            .with_settle(Duration::from_millis(10));
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.settle, Duration::from_millis(10));
    }

    #[test]
    fn without_waits_zeroes_every_delay() {
        let config = HarnessConfig::new().without_waits();
        assert_eq!(config.settle, Duration::ZERO);
        assert_eq!(config.focus_delay, Duration::ZERO);
        assert_eq!(config.loading_indicator_timeout, Duration::ZERO);
    }
}
