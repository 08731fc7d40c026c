//! Markdown file discovery.
//!
//! Walks the served tree on every call. There is no cache and no watcher:
//! a page view costs one full walk, which is fine for a single local user.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::ignore::IgnoreRules;

/// Extension (case-sensitive) of files listed in the menu.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Returns true if `path` has the Markdown extension.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXTENSION)
}

/// Collect every Markdown file under `root` that no rule excludes.
///
/// Entries are visited in file-name order. Walk errors are logged and
/// skipped; whatever was collected is returned. Files whose relative path is
/// not valid UTF-8 are skipped too, since no menu link could address them.
pub fn discover(root: &Path, rules: &IgnoreRules) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "Error walking directory");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if path.strip_prefix(root).unwrap_or(path).to_str().is_none() {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        }

        if is_markdown(path) && !rules.matches(root, path) {
            files.push(path.to_path_buf());
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Discovery complete");
    files
}
