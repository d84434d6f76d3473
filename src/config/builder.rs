//! Type-safe builder for `CrawlArgs` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time
//! validation ensuring that the two required fields — the output path and
//! the browser executable — are set before building a `CrawlArgs`.

use std::marker::PhantomData;
use std::path::PathBuf;

use crate::error::{CrawlError, CrawlResult};

use super::types::{CrawlArgs, DebugLevel, ProxyServer};

// Type states for the builder
pub struct WithOutputPath;
pub struct WithExecutablePath;

pub struct CrawlArgsBuilder<State = ()> {
    pub(crate) output_path: Option<PathBuf>,
    pub(crate) executable_path: Option<PathBuf>,
    pub(crate) existing_profile_path: Option<PathBuf>,
    pub(crate) persist_profile_path: Option<PathBuf>,
    pub(crate) with_shields_up: bool,
    pub(crate) debug_level: DebugLevel,
    pub(crate) extensions_path: Option<PathBuf>,
    pub(crate) proxy_server: Option<ProxyServer>,
    pub(crate) extra_args: Vec<String>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for CrawlArgsBuilder<()> {
    fn default() -> Self {
        Self {
            output_path: None,
            executable_path: None,
            existing_profile_path: None,
            persist_profile_path: None,
            with_shields_up: true,
            debug_level: DebugLevel::Normal,
            extensions_path: None,
            proxy_server: None,
            extra_args: Vec::new(),
            _phantom: PhantomData,
        }
    }
}

impl CrawlArgs {
    /// Create a builder for configuring `CrawlArgs` with a fluent interface
    #[must_use]
    pub fn builder() -> CrawlArgsBuilder<()> {
        CrawlArgsBuilder::default()
    }
}

impl CrawlArgsBuilder<()> {
    pub fn output_path(self, path: impl Into<PathBuf>) -> CrawlArgsBuilder<WithOutputPath> {
        CrawlArgsBuilder {
            output_path: Some(path.into()),
            executable_path: self.executable_path,
            existing_profile_path: self.existing_profile_path,
            persist_profile_path: self.persist_profile_path,
            with_shields_up: self.with_shields_up,
            debug_level: self.debug_level,
            extensions_path: self.extensions_path,
            proxy_server: self.proxy_server,
            extra_args: self.extra_args,
            _phantom: PhantomData,
        }
    }
}

impl CrawlArgsBuilder<WithOutputPath> {
    pub fn executable_path(self, path: impl Into<PathBuf>) -> CrawlArgsBuilder<WithExecutablePath> {
        CrawlArgsBuilder {
            output_path: self.output_path,
            executable_path: Some(path.into()),
            existing_profile_path: self.existing_profile_path,
            persist_profile_path: self.persist_profile_path,
            with_shields_up: self.with_shields_up,
            debug_level: self.debug_level,
            extensions_path: self.extensions_path,
            proxy_server: self.proxy_server,
            extra_args: self.extra_args,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when both required fields are set
impl CrawlArgsBuilder<WithExecutablePath> {
    pub fn build(self) -> CrawlResult<CrawlArgs> {
        Ok(CrawlArgs {
            output_path: self
                .output_path
                .ok_or_else(|| CrawlError::Config("output_path is required".to_string()))?,
            executable_path: self
                .executable_path
                .ok_or_else(|| CrawlError::Config("executable_path is required".to_string()))?,
            existing_profile_path: self.existing_profile_path,
            persist_profile_path: self.persist_profile_path,
            with_shields_up: self.with_shields_up,
            debug_level: self.debug_level,
            extensions_path: self.extensions_path,
            proxy_server: self.proxy_server,
            extra_args: self.extra_args,
        })
    }
}
