//! Best-effort failure diagnostics.
//!
//! When a probe exhausts its candidates the harness captures what the page
//! looked like: a full-page screenshot plus the leading body text. Capture
//! itself never fails a test; every step degrades to a `warn` log.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::driver::PageDriver;

/// Longest body-text excerpt included in logs
const BODY_EXCERPT_CHARS: usize = 500;

/// Sink for diagnostic artifacts
#[derive(Debug, Clone)]
pub struct Diagnostics {
    artifact_dir: PathBuf,
}

impl Diagnostics {
    /// Create a sink writing under `artifact_dir`
    #[must_use]
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
        }
    }

    /// Directory artifacts are written to
    #[must_use]
    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// Capture a screenshot and body-text excerpt tagged with `tag`.
    ///
    /// Never returns an error; failures along the way are logged and
    /// swallowed so a broken page cannot turn a diagnostic into a test
    /// failure of its own.
    pub async fn capture<D: PageDriver + ?Sized>(&self, driver: &D, tag: &str) {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f");

        match driver.screenshot().await {
            Ok(bytes) if !bytes.is_empty() => {
                let path = self.artifact_dir.join(format!("{tag}-{stamp}.png"));
                if let Err(e) = write_artifact(&path, &bytes).await {
                    warn!(tag, error = %e, "failed to write diagnostic screenshot");
                } else {
                    debug!(tag, path = %path.display(), "diagnostic screenshot written");
                }
            }
            Ok(_) => debug!(tag, "screenshot capture returned no data"),
            Err(e) => warn!(tag, error = %e, "screenshot capture failed"),
        }

        match driver.body_text().await {
            Ok(body) => {
                let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
                warn!(tag, body_excerpt = %excerpt, "page body at capture time");
            }
            Err(e) => warn!(tag, error = %e, "body text capture failed"),
        }
    }
}

async fn write_artifact(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}
