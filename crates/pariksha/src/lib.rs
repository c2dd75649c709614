//! Pariksha: resilient browser E2E harness for the Singlish-to-Sinhala web
//! translator.
//!
//! The target is a hosted site with no stable selector contract, no exposed
//! completion signal, and markup that drifts across redesigns. Everything in
//! this crate exists to tolerate that: priority-ordered selector cascades, a
//! tiered output reader that falls back to Unicode-range scanning, a clear
//! control finder that treats absence as a valid state, and a test runner
//! that retries the whole interaction sequence across full page reloads.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  TranslatorSession (runner)                                      │
//! │    locate → clear → fill → settle → read → assert                │
//! │    on failure: reload, retry up to the bound                     │
//! ├──────────────┬─────────────────┬─────────────────────────────────┤
//! │ locator      │ output          │ controls                        │
//! │ candidate    │ three-tier      │ clear-button                    │
//! │ cascade      │ reader          │ heuristics                      │
//! ├──────────────┴─────────────────┴─────────────────────────────────┤
//! │  PageDriver trait                                                │
//! │    CdpDriver (chromiumoxide, feature "browser")                  │
//! │    FakeDriver (scripted pages, unit tests)                       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Live runs need the `browser` feature and a local Chromium; the heuristics
//! themselves are exercised against scripted pages without either.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod config;
pub mod controls;
pub mod diagnostics;
pub mod driver;
pub mod locator;
pub mod matcher;
pub mod output;
pub mod result;
pub mod runner;

/// Real browser control via the Chrome DevTools Protocol
#[cfg(feature = "browser")]
pub mod browser;

pub use config::{HarnessConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_SETTLE_MS};
pub use controls::{find_clear_control, CLEAR_INDICATORS, CLEAR_LABELS};
pub use diagnostics::Diagnostics;
pub use driver::{ElementFacts, FakeDriver, FakeElement, PageDriver, PageState};
pub use locator::{input_candidates, locate};
pub use matcher::{Candidate, Located, Matcher};
pub use output::{
    contains_sinhala, is_sinhala, output_candidates, read_output, sinhala_runs, NO_OUTPUT,
};
pub use result::{HarnessError, HarnessResult};
pub use runner::{
    ClearMethod, Expectation, TestOutcome, TranslationCase, TranslatorSession,
};

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, CdpDriver};
