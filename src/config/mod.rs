//! Crawl argument types and their type-safe builder.
//!
//! This module provides the `CrawlArgs` struct and its builder for
//! describing a single crawl: where output goes, which browser binary to
//! run, and how its profile, proxy, and extensions are set up.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{CrawlArgsBuilder, WithExecutablePath, WithOutputPath};
pub use types::{CrawlArgs, DebugLevel, ProxyServer};
