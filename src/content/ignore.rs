//! Ignore rules.
//!
//! # Responsibilities
//! - Parse the ignore file (one regex per line, `#` comments)
//! - Match filesystem paths against the compiled rules
//!
//! # Design Decisions
//! - Rules are matched against the path relative to the served root, with
//!   components joined by `/` and no leading separator
//! - Matching is an unanchored regex search: `node_modules` hides every path
//!   containing that token anywhere
//! - A bad rule is logged and dropped; it never prevents the others loading
//! - Compiled once at startup, immutable afterwards (shared without locks)

use regex::Regex;
use std::fs;
use std::path::{Component, Path};

/// Compiled set of exclusion rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    /// Compile rules from raw lines.
    pub fn compile<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match Regex::new(line) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %line, error = %e, "Skipping invalid ignore pattern");
                }
            }
        }
        Self { patterns }
    }

    /// Load rules from an ignore file.
    ///
    /// A missing or unreadable file yields an empty rule set.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => {
                let rules = Self::compile(content.lines());
                tracing::info!(path = %path.display(), rules = rules.len(), "Ignore rules loaded");
                rules
            }
            Err(e) => {
                tracing::info!(path = %path.display(), error = %e, "No ignore file, serving everything");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if any rule matches `path` relative to `root`.
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let key = relative_key(root, path);
        self.patterns.iter().any(|p| p.is_match(&key))
    }
}

/// Root-relative form of `path` used for matching and menu links.
///
/// Paths outside `root` keep all their components, minus the leading
/// separator.
pub fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
