//! Rendered-translation extraction.
//!
//! Output containers vary more across UI redesigns than input controls do,
//! so reading the translation is a three-tier cascade: structured selector
//! probing, then a Sinhala-Unicode-range scan over page elements, then a
//! full-body sweep. Absence of output is a valid (if undesirable)
//! observation, reported as [`NO_OUTPUT`] rather than an error.

use tracing::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::driver::PageDriver;
use crate::matcher::{Candidate, Matcher};

/// Sentinel returned when every tier comes up empty
pub const NO_OUTPUT: &str = "No output found";

/// How many page elements the Unicode-range scan inspects
const SCAN_LIMIT: usize = 50;

/// First code point of the Sinhala Unicode block
pub const SINHALA_BLOCK_START: char = '\u{0D80}';

/// Last code point of the Sinhala Unicode block
pub const SINHALA_BLOCK_END: char = '\u{0DFF}';

/// Whether a character falls in the Sinhala Unicode block
#[must_use]
pub const fn is_sinhala(c: char) -> bool {
    c >= SINHALA_BLOCK_START && c <= SINHALA_BLOCK_END
}

/// Whether any character of `text` falls in the Sinhala Unicode block
#[must_use]
pub fn contains_sinhala(text: &str) -> bool {
    text.chars().any(is_sinhala)
}

/// Maximal runs of consecutive Sinhala characters in `text`
#[must_use]
pub fn sinhala_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if is_sinhala(c) {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Candidates for the translator's output container, in priority order
#[must_use]
pub fn output_candidates() -> Vec<Candidate> {
    [
        "textarea[readonly]",
        "div.output",
        ".output-area",
        "#output",
        ".sinhala-output",
        "[aria-label*=\"output\" i]",
        "pre",
        "div[role=\"textbox\"]",
        ".translation-result",
        ".result",
        "[class*=\"output\" i]",
        "[class*=\"result\" i]",
        "[class*=\"translation\" i]",
    ]
    .iter()
    .map(|css| Candidate::from_css(css))
    .collect()
}

/// Read the rendered translation.
///
/// Tiers, each attempted only if the prior yields nothing:
///
/// 1. Structured probe over [`output_candidates`]: for each visible match,
///    text content, then the `value` attribute, then the live input value,
///    accepting the first non-empty trimmed result.
/// 2. Scan a bounded prefix of page elements for one whose text contains
///    Sinhala-block characters.
/// 3. Concatenate all Sinhala runs found in the whole body text.
///
/// Driver errors at any tier degrade to the next; if everything is empty a
/// diagnostic is captured and [`NO_OUTPUT`] returned.
pub async fn read_output<D: PageDriver + ?Sized>(driver: &D, diagnostics: &Diagnostics) -> String {
    for candidate in output_candidates() {
        if let Some(text) = probe_structured(driver, &candidate).await {
            info!(candidate = candidate.label(), "output found");
            return text;
        }
    }

    match driver.describe_all(&Matcher::css("*")).await {
        Ok(facts) => {
            for fact in facts.iter().take(SCAN_LIMIT) {
                let trimmed = fact.text.trim();
                if !trimmed.is_empty() && contains_sinhala(trimmed) {
                    info!("output found by Unicode-range scan");
                    return trimmed.to_string();
                }
            }
        }
        Err(e) => debug!(error = %e, "element scan failed"),
    }

    match driver.body_text().await {
        Ok(body) => {
            let runs = sinhala_runs(&body);
            if !runs.is_empty() {
                info!("output assembled from body text");
                return runs.join(" ");
            }
        }
        Err(e) => debug!(error = %e, "body text read failed"),
    }

    diagnostics.capture(driver, "output-not-found").await;
    NO_OUTPUT.to_string()
}

/// Probe one structured candidate; `None` on any error, invisibility, or
/// empty result.
async fn probe_structured<D: PageDriver + ?Sized>(
    driver: &D,
    candidate: &Candidate,
) -> Option<String> {
    let matcher = candidate.matcher();

    match driver.count(matcher).await {
        Ok(n) if n > 0 => {}
        Ok(_) => return None,
        Err(e) => {
            debug!(candidate = candidate.label(), error = %e, "probe failed");
            return None;
        }
    }
    match driver.is_visible(matcher).await {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            debug!(candidate = candidate.label(), error = %e, "visibility check failed");
            return None;
        }
    }

    let reads = [
        driver.text_content(matcher).await,
        driver.attribute(matcher, "value").await,
        driver.input_value(matcher).await,
    ];
    for read in reads {
        match read {
            Ok(Some(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Ok(None) => {}
            Err(e) => {
                debug!(candidate = candidate.label(), error = %e, "text read failed");
                return None;
            }
        }
    }
    None
}
