//! Negative functional tests: shorthand, typos, and noise that the site
//! transliterates verbatim rather than translating.
//!
//! These assert the exact rendered output, so any change in the site's
//! fallback transliteration shows up here first.

use pariksha::HarnessResult;
use translator_e2e::{cases, run_case};

async fn check(id: &str) -> HarnessResult<()> {
    run_case(&cases::negative(id)).await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0001_chat_shorthand_thx() -> HarnessResult<()> {
    check("Neg_Fun_0001").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0002_short_form_u() -> HarnessResult<()> {
    check("Neg_Fun_0002").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0003_numeric_shorthand_gr8() -> HarnessResult<()> {
    check("Neg_Fun_0003").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0004_mixed_case_input() -> HarnessResult<()> {
    check("Neg_Fun_0004").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0005_misspelled_phrase() -> HarnessResult<()> {
    check("Neg_Fun_0005").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0006_shorthand_with_trailing_noise() -> HarnessResult<()> {
    check("Neg_Fun_0006").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0007_excessive_repetition() -> HarnessResult<()> {
    check("Neg_Fun_0007").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0008_incomplete_word() -> HarnessResult<()> {
    check("Neg_Fun_0008").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0009_mixed_language_gibberish() -> HarnessResult<()> {
    check("Neg_Fun_0009").await
}

#[tokio::test]
#[ignore = "requires a local Chromium and network access to the live translator"]
async fn neg_fun_0010_long_stress_input() -> HarnessResult<()> {
    check("Neg_Fun_0010").await
}
