//! Crawl profile directory management
//!
//! Resolves the on-disk user-data directory a crawl runs against: an
//! existing caller-supplied profile, or a fresh deep copy of one of the
//! two template profiles (shields up / shields down), placed at a
//! persistent or temporary location. The returned handle carries the
//! cleanup obligation for the directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::artifacts::delete_at_path;
use crate::config::CrawlArgs;
use crate::error::CrawlResult;
use crate::utils::{RESOURCES_DIR, SHIELDS_DOWN_PROFILE, SHIELDS_UP_PROFILE, TEMP_PROFILE_PREFIX};

// =============================================================================
// ProfileHandle - profile directory plus its cleanup obligation
// =============================================================================

/// The profile directory for a single crawl, with its cleanup obligation.
///
/// When `owns_cleanup` is true the directory is removed, recursively and
/// non-fatally, exactly once: by an explicit [`cleanup`](Self::cleanup)
/// call, or failing that when the handle is dropped. Handles for
/// caller-supplied (`existing_profile_path`) or persisted
/// (`persist_profile_path`) profiles never remove anything — the caller
/// keeps responsibility for those directories.
#[derive(Debug)]
pub struct ProfileHandle {
    path: PathBuf,
    owns_cleanup: bool,
}

impl ProfileHandle {
    fn new(path: PathBuf, owns_cleanup: bool) -> Self {
        Self { path, owns_cleanup }
    }

    /// Get reference to the profile directory path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this handle will remove the directory when released.
    #[must_use]
    pub fn owns_cleanup(&self) -> bool {
        self.owns_cleanup
    }

    /// Consume the handle and return the path, disabling auto-cleanup.
    ///
    /// Use this when transferring ownership to another cleanup mechanism.
    #[must_use]
    pub fn into_path(mut self) -> PathBuf {
        self.owns_cleanup = false;
        std::mem::take(&mut self.path)
    }

    /// Disable auto-cleanup without consuming self.
    pub fn disable_cleanup(&mut self) {
        self.owns_cleanup = false;
    }

    /// Remove the profile directory now, if this handle owns it.
    ///
    /// Idempotent; removal failures are logged and absorbed. Consuming
    /// self makes a second cleanup unrepresentable.
    pub async fn cleanup(mut self) {
        if self.owns_cleanup {
            self.owns_cleanup = false;
            debug!("ProfileHandle cleanup: removing {}", self.path.display());
            delete_at_path(&self.path).await;
        }
    }
}

impl Drop for ProfileHandle {
    fn drop(&mut self) {
        if self.owns_cleanup && self.path.exists() {
            debug!("ProfileHandle cleanup: removing {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(
                    "Failed to clean up profile directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

// =============================================================================
// Profile resolution
// =============================================================================

/// Resolve the profile directory for the crawl described by `args`.
///
/// The easiest case is a caller-supplied existing profile: its path is
/// returned as-is, with no copy and no cleanup obligation. Otherwise the
/// shields-up or shields-down template under `resources/` is deep-copied
/// to the destination — the persist path when given, else a freshly
/// allocated uniquely-named temporary directory — and the handle owns
/// cleanup exactly when the directory was temporary.
///
/// Errors here are configuration errors, fatal for the crawl; launch
/// retries never apply to provisioning.
pub fn resolve_profile(args: &CrawlArgs) -> CrawlResult<ProfileHandle> {
    let resources_dir = std::env::current_dir()
        .context("resolving current working directory")?
        .join(RESOURCES_DIR);
    resolve_profile_at(&resources_dir, args)
}

fn resolve_profile_at(resources_dir: &Path, args: &CrawlArgs) -> CrawlResult<ProfileHandle> {
    if let Some(existing) = args.existing_profile_path() {
        debug!("Crawling with profile at {}", existing.display());
        return Ok(ProfileHandle::new(existing.to_path_buf(), false));
    }

    let template_name = if args.with_shields_up() {
        SHIELDS_UP_PROFILE
    } else {
        SHIELDS_DOWN_PROFILE
    };
    let template = resources_dir.join(template_name);
    if !template.is_dir() {
        return Err(
            anyhow::anyhow!("template profile not found: {}", template.display()).into(),
        );
    }

    let (dest, owns_cleanup) = match args.persist_profile_path() {
        Some(persist) => (persist.to_path_buf(), false),
        None => (allocate_temp_profile_dir()?, true),
    };

    copy_profile_tree(&template, &dest)?;
    debug!("Crawling with profile at {}", dest.display());
    Ok(ProfileHandle::new(dest, owns_cleanup))
}

/// Allocate a uniquely-named temporary profile directory.
///
/// Ownership passes to the `ProfileHandle`; the tempfile guard must not
/// delete the directory behind our back.
fn allocate_temp_profile_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(TEMP_PROFILE_PREFIX)
        .tempdir()
        .context("allocating temporary profile directory")?;
    Ok(dir.keep())
}

/// Deep-copy the template tree into `dest`.
///
/// Always a full copy, never a link: concurrent crawls must not share
/// mutable profile state.
fn copy_profile_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry =
            entry.with_context(|| format!("walking template profile {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .context("template walk escaped its root")?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("creating profile directory {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("creating profile directory {}", parent.display())
                })?;
            }
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("copying profile file to {}", target.display()))?;
        }
    }
    Ok(())
}
