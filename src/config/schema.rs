//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding the ignore file and templates, relative to the
/// working directory.
pub const DEFAULT_CONFIG_DIR: &str = ".markdown-server";

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// What is served and how it is presented.
    pub content: ContentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host name or address to bind.
    pub host: String,

    /// TCP port (0 picks a free one).
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl ListenerConfig {
    /// `host:port` as passed to the socket bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Served tree and presentation files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory to serve. Made absolute at startup.
    pub root: PathBuf,

    /// Directory holding `ignore`, `index.html` and `menu.html`.
    pub config_dir: PathBuf,

    /// Ignore file; defaults to `<config_dir>/ignore`.
    pub ignore_file: Option<PathBuf>,

    /// Page template; defaults to `<config_dir>/index.html`.
    pub page_template: Option<PathBuf>,

    /// Menu template; defaults to `<config_dir>/menu.html`.
    pub menu_template: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            ignore_file: None,
            page_template: None,
            menu_template: None,
        }
    }
}

impl ContentConfig {
    pub fn ignore_path(&self) -> PathBuf {
        self.ignore_file
            .clone()
            .unwrap_or_else(|| self.config_dir.join("ignore"))
    }

    pub fn page_template_path(&self) -> PathBuf {
        self.page_template
            .clone()
            .unwrap_or_else(|| self.config_dir.join("index.html"))
    }

    pub fn menu_template_path(&self) -> PathBuf {
        self.menu_template
            .clone()
            .unwrap_or_else(|| self.config_dir.join("menu.html"))
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound for handling one request, in seconds. A request still
    /// running when it expires (e.g. a slow walk of a large tree) is answered
    /// with `408 Request Timeout`.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
