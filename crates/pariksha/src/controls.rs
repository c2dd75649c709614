//! Heuristic discovery of the page's clear/reset control.
//!
//! The target UI may or may not ship a clear button, and nothing about it is
//! stable. Discovery therefore runs a staged search and reports absence as
//! `None`, never as an error, so callers can fall back to clearing the input
//! manually.

use tracing::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::driver::{ElementFacts, PageDriver};
use crate::matcher::{Located, Matcher};

/// Exact visible labels tried first
pub const CLEAR_LABELS: [&str; 8] = [
    "Clear",
    "Reset",
    "X",
    "×",
    "✕",
    "🗑️",
    "Clear All",
    "Clear Text",
];

/// Substrings that mark a button as clear-like during the exhaustive scan
pub const CLEAR_INDICATORS: [&str; 6] = ["clear", "reset", "x", "delete", "remove", "erase"];

const ARIA_TITLE_BUTTONS: &str = "button[aria-label*=\"clear\" i], button[aria-label*=\"reset\" i], \
     button[title*=\"clear\" i], button[title*=\"reset\" i]";

const CLASS_BUTTONS: &str = "button[class*=\"clear\" i], button[class*=\"reset\" i]";

const CLEARISH_ELEMENTS: &str = "[class*=\"clear\" i], [class*=\"reset\" i], \
     [aria-label*=\"clear\" i], [title*=\"clear\" i]";

/// Locate a clear/reset control, if the page has one.
///
/// Search order: exact visible text against [`CLEAR_LABELS`]; ARIA-label or
/// title containing clear/reset; class name containing clear/reset; an
/// exhaustive scan of all visible buttons scored against
/// [`CLEAR_INDICATORS`]; finally any element with clear/reset-like
/// attributes. First success wins. Driver errors degrade to the next stage;
/// exhaustion captures a diagnostic and returns `None`.
pub async fn find_clear_control<D: PageDriver + ?Sized>(
    driver: &D,
    diagnostics: &Diagnostics,
) -> Option<Located> {
    // (a) exact text
    for label in CLEAR_LABELS {
        let matcher = Matcher::with_text("button", label);
        match driver.count(&matcher).await {
            Ok(n) if n > 0 => {
                info!(label, "clear button found by text");
                return Some(Located::new(matcher, format!("button \"{label}\"")));
            }
            Ok(_) => {}
            Err(e) => debug!(label, error = %e, "text probe failed"),
        }
    }

    // (b) aria-label / title
    if let Some(found) =
        probe_css(driver, ARIA_TITLE_BUTTONS, "button by aria-label/title").await
    {
        return Some(found);
    }

    // (c) class name
    if let Some(found) = probe_css(driver, CLASS_BUTTONS, "button by class").await {
        return Some(found);
    }

    // (d) exhaustive scan of visible buttons
    match driver.describe_all(&Matcher::css("button")).await {
        Ok(buttons) => {
            debug!(total = buttons.len(), "scanning buttons");
            for (index, facts) in buttons.iter().enumerate() {
                if facts.visible && looks_clear_like(facts) {
                    info!(index, text = %facts.text, "clear button found by scan");
                    return Some(Located::new(
                        Matcher::nth("button", index),
                        format!("button #{index} \"{}\"", facts.text.trim()),
                    ));
                }
            }
        }
        Err(e) => debug!(error = %e, "button scan failed"),
    }

    // (e) broaden beyond buttons
    match driver.describe_all(&Matcher::css(CLEARISH_ELEMENTS)).await {
        Ok(elements) => {
            for (index, facts) in elements.iter().enumerate() {
                if facts.visible {
                    info!(index, "clear element found outside buttons");
                    return Some(Located::new(
                        Matcher::nth(CLEARISH_ELEMENTS, index),
                        format!("clear-like element #{index}"),
                    ));
                }
            }
        }
        Err(e) => debug!(error = %e, "clear element scan failed"),
    }

    diagnostics.capture(driver, "clear-not-found").await;
    debug!("no clear control on page; callers should clear manually");
    None
}

async fn probe_css<D: PageDriver + ?Sized>(
    driver: &D,
    css: &str,
    label: &str,
) -> Option<Located> {
    let matcher = Matcher::css(css);
    match driver.count(&matcher).await {
        Ok(n) if n > 0 => {
            info!(label, "clear button found");
            Some(Located::new(matcher, label))
        }
        Ok(_) => None,
        Err(e) => {
            debug!(label, error = %e, "probe failed");
            None
        }
    }
}

/// Score one button's facts against the indicator vocabulary
fn looks_clear_like(facts: &ElementFacts) -> bool {
    let text = facts.text.trim();
    if text == "X" || text == "×" {
        return true;
    }
    let haystacks = [
        Some(text.to_lowercase()),
        facts.aria_label.as_ref().map(|s| s.to_lowercase()),
        facts.title.as_ref().map(|s| s.to_lowercase()),
        facts.class_name.as_ref().map(|s| s.to_lowercase()),
    ];
    haystacks.iter().flatten().any(|haystack| {
        CLEAR_INDICATORS
            .iter()
            .any(|indicator| haystack.contains(indicator))
    })
}
