//! Artifact path resolution and persistence
//!
//! The three artifacts of a crawl — graph export, network archive,
//! screenshot — derive from one canonical base path per (args, url) pair,
//! so they always land side by side in the same directory under the same
//! filename stem. Writes are best-effort: a failed write is logged with
//! its path and absorbed, never aborting the crawl.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use url::Url;

use crate::config::CrawlArgs;

/// Matches every character the original filename contract replaces.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Za-z_]").expect("static pattern compiles"));

/// Resolved output paths for one crawl of one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub graphml: PathBuf,
    pub har: PathBuf,
    pub screenshot: PathBuf,
}

fn file_safe_url(url: &Url) -> String {
    NON_WORD.replace_all(url.as_str(), "_").into_owned()
}

fn graphml_filename(url: &Url) -> String {
    format!(
        "page_graph_{}_{}.graphml",
        file_safe_url(url),
        Utc::now().timestamp()
    )
}

/// Resolve the graph-export path for `url`.
///
/// If the configured output path names an existing directory, a filename
/// is synthesized inside it from the sanitized URL and the current unix
/// timestamp, keeping many URLs in one run apart. Otherwise the output
/// path is taken literally as the full target — the caller's explicit
/// override, and theirs to keep unique.
#[must_use]
pub fn graphml_path(args: &CrawlArgs, url: &Url) -> PathBuf {
    let output_path = args.output_path();
    if output_path.is_dir() {
        output_path.join(graphml_filename(url))
    } else {
        output_path.to_path_buf()
    }
}

/// Resolve all three artifact paths from one canonical base.
///
/// The archive and screenshot paths are derived from the resolved
/// graph-export path by extension substitution, so the trio is guaranteed
/// to correspond to the same crawl.
#[must_use]
pub fn resolve_artifact_paths(args: &CrawlArgs, url: &Url) -> ArtifactPaths {
    let graphml = graphml_path(args, url);
    ArtifactPaths {
        har: graphml.with_extension("har"),
        screenshot: graphml.with_extension("png"),
        graphml,
    }
}

/// Resolve the screenshot path for `url`. Writing it is the browser
/// collaborator's job; only the location is decided here.
#[must_use]
pub fn screenshot_path(args: &CrawlArgs, url: &Url) -> PathBuf {
    resolve_artifact_paths(args, url).screenshot
}

/// Persist the graph export handed back by the browser.
///
/// Best-effort: a failed write is logged with the offending path and
/// absorbed; a single lost artifact must not abort the crawl.
pub async fn write_graphml(args: &CrawlArgs, url: &Url, data: &[u8]) {
    let path = graphml_path(args, url);
    match tokio::fs::write(&path, data).await {
        Ok(()) => info!("Writing PageGraph file to {}", path.display()),
        Err(e) => error!("saving page graph export to {}: {e}", path.display()),
    }
}

/// Persist the network archive as human-readable JSON (4-space indent).
///
/// Best-effort, like [`write_graphml`].
pub async fn write_har(args: &CrawlArgs, url: &Url, har: &serde_json::Value) {
    let path = resolve_artifact_paths(args, url).har;
    let bytes = match serialize_har(har) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("serializing HAR for {}: {e}", path.display());
            return;
        }
    };
    match tokio::fs::write(&path, bytes).await {
        Ok(()) => info!("Writing HAR file to {}", path.display()),
        Err(e) => error!("saving HAR file to {}: {e}", path.display()),
    }
}

fn serialize_har(har: &serde_json::Value) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    har.serialize(&mut serializer)?;
    Ok(out)
}

/// Recursively and forcibly remove `path`, file or directory.
///
/// Idempotent: a missing path is not an error. Other removal failures are
/// logged and absorbed. This is the only deletion primitive in the crate;
/// profile cleanup routes through it too.
pub async fn delete_at_path(path: &Path) {
    let result = match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(path).await,
        Ok(_) => tokio::fs::remove_file(path).await,
        Err(e) if e.kind() == ErrorKind::NotFound => return,
        Err(e) => {
            warn!("inspecting {} for deletion: {e}", path.display());
            return;
        }
    };
    if let Err(e) = result
        && e.kind() != ErrorKind::NotFound
    {
        warn!("removing {}: {e}", path.display());
    }
}
