//! Error types for the launch, profile, and artifact subsystem.
//!
//! The taxonomy mirrors how failures propagate: profile and configuration
//! errors are fatal and never retried, a single launch attempt's failure is
//! transient and retried per policy, and an exhausted retry budget is
//! terminal. Artifact-write and cleanup failures never appear here at all;
//! they are logged and absorbed at the point of the write.

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Convenience alias for Result with [`CrawlError`].
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Errors surfaced to the caller of this crate.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Profile provisioning failed (missing template profile or copy
    /// error). Fatal for the crawl; retry belongs to launch, not here.
    #[error("profile setup failed: {0}")]
    Profile(String),

    /// A single browser launch attempt failed. Transient; the retry loop
    /// handles it.
    #[error("browser launch failed: {0}")]
    Launch(#[from] CdpError),

    /// Every launch attempt failed and the retry budget is spent.
    #[error("unable to launch browser after {0} retries")]
    RetriesExhausted(u32),

    /// Invalid crawl or launch configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<anyhow::Error> for CrawlError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Profile(format!("{err:#}"))
    }
}

impl CrawlError {
    /// Whether the retry loop should attempt again after this error.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Launch(_))
    }

    /// Whether this error is a launch timeout, as opposed to any other
    /// launch failure. Lets callers apply different patience to a browser
    /// that is slow versus one that is broken.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Launch(err) => {
                matches!(err, CdpError::Timeout)
                    || err.to_string().to_lowercase().contains("timed out")
            }
            _ => false,
        }
    }
}
