//! Getter methods for `CrawlArgs`
//!
//! This module provides the accessor methods for retrieving argument
//! values from a `CrawlArgs` instance.

use std::path::Path;

use super::types::{CrawlArgs, DebugLevel, ProxyServer};

impl CrawlArgs {
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    #[must_use]
    pub fn existing_profile_path(&self) -> Option<&Path> {
        self.existing_profile_path.as_deref()
    }

    #[must_use]
    pub fn persist_profile_path(&self) -> Option<&Path> {
        self.persist_profile_path.as_deref()
    }

    #[must_use]
    pub fn with_shields_up(&self) -> bool {
        self.with_shields_up
    }

    #[must_use]
    pub fn debug_level(&self) -> DebugLevel {
        self.debug_level
    }

    #[must_use]
    pub fn extensions_path(&self) -> Option<&Path> {
        self.extensions_path.as_deref()
    }

    #[must_use]
    pub fn proxy_server(&self) -> Option<&ProxyServer> {
        self.proxy_server.as_ref()
    }

    #[must_use]
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }
}
