//! UI tests: clear-control interaction against the live site.

use std::time::Duration;

use pariksha::{HarnessResult, NO_OUTPUT};
use tracing::info;
use translator_e2e::live_session;

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn pos_ui_0001_clear_input_functionality() -> HarnessResult<()> {
    let (browser, mut session) = live_session().await?;
    let result = clear_input_scenario(&mut session).await;
    drop(session);
    let _ = browser.close().await;
    result
}

async fn clear_input_scenario<D: pariksha::PageDriver>(
    session: &mut pariksha::TranslatorSession<D>,
) -> HarnessResult<()> {
    let input = session.locate_input().await?;

    // Enter text and confirm the input holds it.
    let test_text = "mama gedhara yanavaa";
    session.fill_input(&input, test_text).await?;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(session.input_value(&input).await?, test_text);

    // Give the translation extra time; accuracy is not under test here, only
    // that some output can be observed before clearing.
    tokio::time::sleep(Duration::from_millis(3000)).await;
    let initial_output = session.read_output().await;
    info!(initial_output = %initial_output, "output before clear");

    // Clear via the discovered control, or manually when the page has none.
    let method = session.clear_input(&input).await?;
    info!(method = method.name(), "input cleared");
    assert_eq!(session.input_value(&input).await?, "");

    tokio::time::sleep(Duration::from_millis(1000)).await;
    let cleared_output = session.read_output().await;
    if initial_output != NO_OUTPUT && cleared_output != NO_OUTPUT {
        assert_ne!(
            cleared_output, initial_output,
            "output did not change after clearing the input"
        );
    }

    // The input accepts new text after clearing and reads back exactly.
    let new_text = "api yamu";
    session.fill_input(&input, new_text).await?;
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(session.input_value(&input).await?, new_text);

    let new_output = session.read_output().await;
    info!(new_output = %new_output, "output after refill");

    Ok(())
}
