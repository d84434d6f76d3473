//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;

use super::builder::CrawlArgsBuilder;
use super::types::{DebugLevel, ProxyServer};

// Methods available for all states; none of these fields are required
impl<State> CrawlArgsBuilder<State> {
    /// Crawl against an existing profile directory instead of cloning a
    /// template. The caller keeps responsibility for the directory's
    /// lifetime.
    #[must_use]
    pub fn existing_profile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing_profile_path = Some(path.into());
        self
    }

    /// Copy the template profile to this exact path and keep it after the
    /// crawl instead of allocating a throwaway temporary directory.
    #[must_use]
    pub fn persist_profile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_profile_path = Some(path.into());
        self
    }

    /// Select the shields-up or shields-down template profile.
    #[must_use]
    pub fn with_shields_up(mut self, shields_up: bool) -> Self {
        self.with_shields_up = shields_up;
        self
    }

    #[must_use]
    pub fn debug_level(mut self, level: DebugLevel) -> Self {
        self.debug_level = level;
        self
    }

    /// Load the unpacked extension(s) at this path into the crawl profile.
    #[must_use]
    pub fn extensions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.extensions_path = Some(path.into());
        self
    }

    /// Route browser traffic through this proxy.
    #[must_use]
    pub fn proxy_server(mut self, proxy: ProxyServer) -> Self {
        self.proxy_server = Some(proxy);
        self
    }

    /// Raw launch flags appended after everything this crate assembles,
    /// so they can override any of it.
    #[must_use]
    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}
