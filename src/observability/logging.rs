//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honour `RUST_LOG` when set, otherwise the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level applies to this crate and tower_http request spans

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    format!("markdown_server={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
