//! Filesystem predicates used before launch.

use std::path::Path;

/// True if `path` names an existing regular file the current user can
/// execute. Used to fail fast on a bad `executable_path` before a launch
/// attempt sequence starts.
#[cfg(unix)]
#[must_use]
pub fn is_exec_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Non-Unix fallback: no mode bits to inspect, existence has to do.
#[cfg(not(unix))]
#[must_use]
pub fn is_exec_file(path: &Path) -> bool {
    path.is_file()
}
