//! Result and error types for the harness.

use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving the translator page
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Page-level error (DOM query, script evaluation, interaction)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// No candidate produced a visible match
    #[error("No visible {target} found; tried {}", attempted.join(", "))]
    NotFound {
        /// What was being looked for ("input field", "output area", ...)
        target: String,
        /// Labels of every candidate that was probed, in priority order
        attempted: Vec<String>,
    },

    /// Rendered output did not match the expectation
    #[error("{test_id}: expected {expected}, got {actual:?}")]
    AssertionMismatch {
        /// Test case id
        test_id: String,
        /// Rendered expectation
        expected: String,
        /// Text actually read from the page
        actual: String,
    },

    /// The retry bound was hit; carries the last per-attempt error
    #[error("{test_id}: still failing after {attempts} attempts")]
    ExhaustedRetries {
        /// Test case id
        test_id: String,
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        #[source]
        last: Box<HarnessError>,
    },

    /// Screenshot capture failed
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Wrap a page-level failure message
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_attempted_candidates() {
        let err = HarnessError::NotFound {
            target: "input field".to_string(),
            attempted: vec!["textarea".to_string(), "text input".to_string()],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("input field"));
        assert!(rendered.contains("textarea, text input"));
    }

    #[test]
    fn exhausted_retries_preserves_source() {
        let last = HarnessError::AssertionMismatch {
            test_id: "Pos_Fun_0001".to_string(),
            expected: "contains \"සුබ\"".to_string(),
            actual: "No output found".to_string(),
        };
        let err = HarnessError::ExhaustedRetries {
            test_id: "Pos_Fun_0001".to_string(),
            attempts: 3,
            last: Box::new(last),
        };
        assert!(err.to_string().contains("3 attempts"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
