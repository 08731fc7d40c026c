//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the served root to an absolute directory
//! - Load ignore rules and templates
//! - Assemble the immutable request-handling state
//! - Bind the listener last (traffic only when ready)
//!
//! # Design Decisions
//! - Fail fast: a bad root or an unbindable address is fatal
//! - A missing ignore file or template is not an error; defaults apply

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ServerConfig};
use crate::content::{IgnoreRules, MenuBuilder};
use crate::http::AppState;
use crate::render::{PageRenderer, Templates};
use crate::routing::Dispatcher;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("cannot resolve base directory {path}: {source}")]
    Root { path: PathBuf, source: io::Error },

    #[error("base directory {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to bind {address}: {source}")]
    Bind { address: String, source: io::Error },
}

/// Make `root` absolute and lexically clean, and check it is a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, StartupError> {
    let absolute = std::path::absolute(root).map_err(|source| StartupError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    let cleaned = clean(&absolute);

    let metadata = std::fs::metadata(&cleaned).map_err(|source| StartupError::Root {
        path: cleaned.clone(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(StartupError::NotADirectory(cleaned));
    }

    Ok(cleaned)
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Build everything request handlers need from `config`.
pub fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let root = resolve_root(&config.content.root)?;

    let rules = Arc::new(IgnoreRules::load(&config.content.ignore_path()));
    let templates = Templates::load(
        &config.content.page_template_path(),
        &config.content.menu_template_path(),
    );

    tracing::info!(
        root = %root.display(),
        ignore_rules = rules.len(),
        "Content loaded"
    );

    Ok(AppState::new(
        Dispatcher::new(root, Arc::clone(&rules)),
        MenuBuilder::new(rules, templates.menu),
        PageRenderer::new(templates.page),
    ))
}

/// Bind the TCP listener.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}
