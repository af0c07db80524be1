//! Configuration file discovery

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, trace};

/// File names searched for in each directory, in priority order
pub const CONFIG_FILE_NAMES: [&str; 2] = [".oxfmtrc.json", ".oxfmtrc.jsonc"];

/// Resolve the configuration file that applies to `start_dir`
///
/// An explicit `config_path` wins: absolute paths are returned unchanged,
/// relative ones are joined onto `start_dir`. Its existence is not checked,
/// a missing file shows up when the loader reads it.
///
/// Without an explicit path, searches upward from `start_dir`. In each
/// directory the names in [`CONFIG_FILE_NAMES`] are tried in order and the
/// first regular file found is returned, so the innermost directory wins and
/// `.oxfmtrc.json` beats `.oxfmtrc.jsonc`. Returns `None` once the
/// filesystem root has been searched. `.` and `..` in `start_dir` are folded
/// first, so each step goes to the real parent directory.
pub async fn resolve_config_path(start_dir: &Path, config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(explicit) = config_path.filter(|p| !p.as_os_str().is_empty()) {
        // `join` keeps absolute paths as they are
        return Some(start_dir.join(explicit));
    }

    let start = normalize_path(start_dir);
    let mut current = start.as_path();

    loop {
        if let Some(found) = find_in_directory(current).await {
            debug!("Found config: {}", found.display());
            return Some(found);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    debug!("No config file found above {}", start_dir.display());
    None
}

/// First candidate in `dir` that is a regular file
async fn find_in_directory(dir: &Path) -> Option<PathBuf> {
    for filename in CONFIG_FILE_NAMES {
        let candidate = dir.join(filename);
        match fs::metadata(&candidate).await {
            Ok(metadata) if metadata.is_file() => return Some(candidate),
            Ok(_) => trace!("Skipping non-file {}", candidate.display()),
            Err(_) => trace!("No {}", candidate.display()),
        }
    }
    None
}

/// Fold `.` and `..` out of `path` without touching the filesystem
///
/// `..` at the root stays at the root. Leading `..` of a relative path are
/// kept. Symlinks are not resolved.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir),
            },
            other => normalized.push(other),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(Component::CurDir);
    }
    normalized
}
