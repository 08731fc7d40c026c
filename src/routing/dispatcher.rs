//! Request classification.
//!
//! # Responsibilities
//! - Decide what kind of response a request gets
//! - Apply the checks in a fixed order: method, sandbox, exclusion, then
//!   content kind
//!
//! # Design Decisions
//! - Classification never touches the filesystem; reading happens later in
//!   the handler, so a rejected method costs nothing
//! - Exclusion is checked before existence: an ignored file is reported as
//!   missing, whether or not it exists
//! - Immutable after construction (shared without locks)

use axum::http::Method;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::content::discovery::is_markdown;
use crate::content::ignore::IgnoreRules;
use crate::http::response::ServeError;
use crate::routing::resolver::resolve;

/// Extensions served as raw bytes (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "bmp", "svg", "ico", "webm"];

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderAction {
    /// Landing page with the menu.
    Home,
    /// Render the Markdown file at this path.
    Markdown(PathBuf),
    /// Stream the file at this path as-is.
    Image(PathBuf),
    /// Answer with an error.
    Reject(ServeError),
}

impl RenderAction {
    /// Label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderAction::Home => "home",
            RenderAction::Markdown(_) => "markdown",
            RenderAction::Image(_) => "image",
            RenderAction::Reject(_) => "rejected",
        }
    }
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Classifies requests against the served root.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    root: PathBuf,
    rules: Arc<IgnoreRules>,
}

impl Dispatcher {
    pub fn new(root: PathBuf, rules: Arc<IgnoreRules>) -> Self {
        Self { root, rules }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dispatch(&self, method: &Method, url_path: &str) -> RenderAction {
        if *method != Method::GET {
            return RenderAction::Reject(ServeError::MethodNotAllowed(method.clone()));
        }

        let path = match resolve(&self.root, url_path) {
            Ok(path) => path,
            Err(e) => return RenderAction::Reject(e),
        };

        // The root itself has the empty key, so a rule matching "" hides `/`.
        if self.rules.matches(&self.root, &path) {
            return RenderAction::Reject(ServeError::NotFound(format!(
                "{} is excluded by an ignore rule",
                path.display()
            )));
        }

        if url_path == "/" {
            return RenderAction::Home;
        }

        if is_markdown(&path) {
            return RenderAction::Markdown(path);
        }

        if is_image(&path) {
            return RenderAction::Image(path);
        }

        RenderAction::Reject(ServeError::NotFound(format!(
            "{} is not a servable file type",
            path.display()
        )))
    }
}
