//! Priority-ordered element location.
//!
//! The target markup is not under the tester's control and drifts across
//! redesigns; a heuristic candidate cascade tolerates that drift without
//! hard-coding one brittle selector. Candidates are probed in declared
//! order and the first visible match wins.

use std::time::Duration;

use tracing::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::driver::PageDriver;
use crate::matcher::{Candidate, Located};
use crate::result::{HarnessError, HarnessResult};

/// Candidates for the translator's input control, in priority order
#[must_use]
pub fn input_candidates() -> Vec<Candidate> {
    [
        "textarea",
        "input[type=\"text\"]",
        "input[placeholder*=\"singlish\" i]",
        "input[placeholder*=\"type\" i]",
        "input[placeholder*=\"enter\" i]",
        "[contenteditable=\"true\"]",
        ".input-field",
        "#input",
        "input",
    ]
    .iter()
    .map(|css| Candidate::from_css(css))
    .collect()
}

/// Find the first visible match among `candidates`.
///
/// Probes each candidate in declared order: skip on zero matches, skip when
/// the first match is not visible, and otherwise perform a focusing forced
/// click, wait `focus_delay`, and return immediately. Per-candidate driver
/// errors are logged and treated as "no match" so one broken probe cannot
/// mask a later working one.
///
/// # Errors
///
/// Returns [`HarnessError::NotFound`] carrying every attempted candidate
/// label once the list is exhausted; a diagnostic capture is attempted
/// first.
pub async fn locate<D: PageDriver + ?Sized>(
    driver: &D,
    target: &str,
    candidates: &[Candidate],
    focus_delay: Duration,
    diagnostics: &Diagnostics,
) -> HarnessResult<Located> {
    for candidate in candidates {
        let label = candidate.label();
        match driver.count(candidate.matcher()).await {
            Ok(0) => {
                debug!(target, candidate = label, "no matches");
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                debug!(target, candidate = label, error = %e, "probe failed");
                continue;
            }
        }

        match driver.is_visible(candidate.matcher()).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(target, candidate = label, "match not visible");
                continue;
            }
            Err(e) => {
                debug!(target, candidate = label, error = %e, "visibility check failed");
                continue;
            }
        }

        // Focus the control; a click failure disqualifies the candidate the
        // same way an invisible match does.
        if let Err(e) = driver.click(candidate.matcher()).await {
            debug!(target, candidate = label, error = %e, "focus click failed");
            continue;
        }
        tokio::time::sleep(focus_delay).await;

        info!(target, candidate = label, "located");
        return Ok(Located::new(candidate.matcher().clone(), label));
    }

    let tag = format!("{}-not-found", target.replace(' ', "-"));
    diagnostics.capture(driver, &tag).await;

    Err(HarnessError::NotFound {
        target: target.to_string(),
        attempted: candidates.iter().map(|c| c.label().to_string()).collect(),
    })
}
