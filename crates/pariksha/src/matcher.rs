//! Matcher abstraction for probing page elements.
//!
//! The target site exposes no stable selector contract, so every control is
//! addressed through a typed matcher that the CDP driver compiles to a
//! JavaScript query expression. Matchers are cheap, immutable descriptors;
//! interactions re-evaluate them on every use rather than caching element
//! handles across steps.

use std::fmt;

/// Quote a string as a JavaScript string literal.
///
/// serde_json escaping is valid JavaScript for every input, including the
/// Sinhala range and embedded quotes.
#[must_use]
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

/// A typed descriptor for locating elements on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// CSS selector (e.g. `textarea`, `[class*="output" i]`)
    Css(String),
    /// CSS selector restricted to elements whose trimmed text equals `text`
    WithText {
        /// Base CSS selector
        css: String,
        /// Exact trimmed text content to match
        text: String,
    },
    /// The n-th element (0-based) of a CSS match list
    Nth {
        /// Base CSS selector
        css: String,
        /// Index into the match list
        index: usize,
    },
}

impl Matcher {
    /// Create a CSS matcher
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a CSS matcher filtered to an exact trimmed text
    #[must_use]
    pub fn with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::WithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Create a matcher addressing the n-th match of a CSS selector
    #[must_use]
    pub fn nth(css: impl Into<String>, index: usize) -> Self {
        Self::Nth {
            css: css.into(),
            index,
        }
    }

    /// Compile to a JavaScript expression evaluating to the array of matches
    #[must_use]
    pub fn to_collect_query(&self) -> String {
        match self {
            Self::Css(css) => {
                format!("Array.from(document.querySelectorAll({}))", js_string(css))
            }
            Self::WithText { css, text } => format!(
                "Array.from(document.querySelectorAll({})).filter(el => (el.textContent || '').trim() === {})",
                js_string(css),
                js_string(text)
            ),
            Self::Nth { css, index } => format!(
                "Array.from(document.querySelectorAll({})).slice({index}, {})",
                js_string(css),
                index + 1
            ),
        }
    }

    /// Compile to a JavaScript expression evaluating to the match count
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_collect_query())
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::WithText { css, text } => write!(f, "{css}:text({text})"),
            Self::Nth { css, index } => write!(f, "{css}:nth({index})"),
        }
    }
}

/// An ordered probing rule: a matcher plus a human-readable label.
///
/// Candidate lists are defined at harness configuration time; ordering is
/// significant, first visible match wins.
#[derive(Debug, Clone)]
pub struct Candidate {
    matcher: Matcher,
    label: String,
}

impl Candidate {
    /// Create a candidate from a matcher and label
    #[must_use]
    pub fn new(matcher: Matcher, label: impl Into<String>) -> Self {
        Self {
            matcher,
            label: label.into(),
        }
    }

    /// Shorthand for a CSS candidate labelled by its selector
    #[must_use]
    pub fn from_css(selector: &str) -> Self {
        Self {
            matcher: Matcher::css(selector),
            label: selector.to_string(),
        }
    }

    /// The matcher to probe with
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Human-readable label used in logs and `NotFound` diagnostics
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A control that has been located: the matcher that matched plus the label
/// of the winning candidate.
///
/// Owned by the calling test step for the duration of one interaction and
/// discarded after use; every interaction through it re-queries the page.
#[derive(Debug, Clone)]
pub struct Located {
    matcher: Matcher,
    label: String,
}

impl Located {
    pub(crate) fn new(matcher: Matcher, label: impl Into<String>) -> Self {
        Self {
            matcher,
            label: label.into(),
        }
    }

    /// The matcher addressing the control
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Label of the candidate that matched
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod query_compilation {
        use super::*;

        #[test]
        fn css_collect_query() {
            let query = Matcher::css("textarea").to_collect_query();
            assert!(query.contains("querySelectorAll"));
            assert!(query.contains("\"textarea\""));
        }

        #[test]
        fn with_text_filters_on_trimmed_equality() {
            let query = Matcher::with_text("button", "Clear").to_collect_query();
            assert!(query.contains(".filter("));
            assert!(query.contains(".trim() === \"Clear\""));
        }

        #[test]
        fn nth_slices_single_element() {
            let query = Matcher::nth("button", 2).to_collect_query();
            assert!(query.contains(".slice(2, 3)"));
        }

        #[test]
        fn count_query_appends_length() {
            let query = Matcher::css("pre").to_count_query();
            assert!(query.ends_with(".length"));
        }

        #[test]
        fn embedded_quotes_are_escaped() {
            let query = Matcher::css("input[placeholder*=\"singlish\" i]").to_collect_query();
            assert!(query.contains("\\\"singlish\\\""));
        }

        #[test]
        fn sinhala_text_survives_quoting() {
            let query = Matcher::with_text("button", "මකන්න").to_collect_query();
            assert!(query.contains("මකන්න"));
        }
    }

    mod candidates {
        use super::*;

        #[test]
        fn from_css_labels_with_selector() {
            let candidate = Candidate::from_css("textarea");
            assert_eq!(candidate.label(), "textarea");
            assert_eq!(candidate.matcher(), &Matcher::css("textarea"));
        }

        #[test]
        fn display_distinguishes_variants() {
            assert_eq!(Matcher::css("button").to_string(), "button");
            assert_eq!(
                Matcher::with_text("button", "X").to_string(),
                "button:text(X)"
            );
            assert_eq!(Matcher::nth("button", 4).to_string(), "button:nth(4)");
        }
    }
}
