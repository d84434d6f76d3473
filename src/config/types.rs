//! Core argument types for a single crawl.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Browser/console verbosity for a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    /// Quiet browser process; normal crate diagnostics only.
    #[default]
    Normal,
    /// Pipe browser stderr through and enable PageGraph module logging.
    Verbose,
}

/// Proxy descriptor: scheme, host, optional port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyServer {
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
}

impl ProxyServer {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// SOCKS5 proxies additionally need a host-resolver override so DNS
    /// cannot leak around the tunnel.
    #[must_use]
    pub fn is_socks5(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("socks5")
    }
}

impl fmt::Display for ProxyServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}://{}:{}", self.scheme, self.host, port),
            None => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}

/// Arguments describing a single crawl.
///
/// Profile sourcing invariant: `existing_profile_path`, when set, wins and
/// no template copy happens; otherwise the shields-up/down template flow
/// applies, and `persist_profile_path`, when set, overrides
/// temporary-directory allocation (and leaves the directory's lifetime to
/// the caller).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlArgs {
    /// Target directory for artifacts, or a literal graph-export file path.
    pub(crate) output_path: PathBuf,
    /// Browser binary to launch.
    pub(crate) executable_path: PathBuf,
    /// Crawl an existing profile in place instead of copying a template.
    pub(crate) existing_profile_path: Option<PathBuf>,
    /// Copy the template here and keep it after the crawl.
    pub(crate) persist_profile_path: Option<PathBuf>,
    /// Which template profile to clone: shields up or shields down.
    pub(crate) with_shields_up: bool,
    pub(crate) debug_level: DebugLevel,
    /// Unpacked extension(s) to load into the crawl profile.
    pub(crate) extensions_path: Option<PathBuf>,
    pub(crate) proxy_server: Option<ProxyServer>,
    /// Raw flags appended last, so they can override anything this crate
    /// assembles.
    pub(crate) extra_args: Vec<String>,
}
