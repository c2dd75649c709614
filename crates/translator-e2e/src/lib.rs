//! Live-site E2E suites for the Singlish-to-Sinhala translator.
//!
//! The suites in `tests/` drive the hosted translator through
//! [`pariksha`]'s retrying session. Each test owns its own browser and page;
//! nothing is shared across tests. They are `#[ignore]`d by default because
//! they need a local Chromium and network access to the live site:
//!
//! ```text
//! cargo test -p translator-e2e -- --ignored
//! ```
//!
//! Set `CHROMIUM_PATH` to point at a specific binary and
//! `PARIKSHA_NO_SANDBOX=1` when running inside a container.

pub mod cases;

use pariksha::browser::{Browser, BrowserConfig, CdpDriver};
use pariksha::{HarnessConfig, HarnessResult, TranslationCase, TranslatorSession};
use tracing::info;

/// Initialize logging once per test binary; respects `RUST_LOG`
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Browser configuration honoring the `CHROMIUM_PATH` and
/// `PARIKSHA_NO_SANDBOX` environment variables
#[must_use]
pub fn browser_config() -> BrowserConfig {
    let mut config = BrowserConfig::default();
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        config = config.with_chromium_path(path);
    }
    if std::env::var_os("PARIKSHA_NO_SANDBOX").is_some() {
        config = config.with_no_sandbox();
    }
    config
}

/// Launch a browser and open a session on the live translator
pub async fn live_session() -> HarnessResult<(Browser, TranslatorSession<CdpDriver>)> {
    init_logging();
    let browser = Browser::launch(browser_config()).await?;
    let driver = browser.new_page().await?;
    let mut session = TranslatorSession::new(driver, HarnessConfig::default());
    session.open().await?;
    Ok((browser, session))
}

/// Run one declarative case in a fresh session, closing the browser either way
pub async fn run_case(case: &TranslationCase) -> HarnessResult<()> {
    let (browser, mut session) = live_session().await?;
    let result = session.run(case).await;
    drop(session);
    let _ = browser.close().await;

    let outcome = result?;
    info!(
        id = %outcome.id,
        attempts = outcome.attempts,
        actual = %outcome.actual,
        "case passed"
    );
    Ok(())
}
