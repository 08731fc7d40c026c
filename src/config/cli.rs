//! Command-line arguments.
//!
//! Flags override values from the optional config file, which in turn
//! override the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::ServerConfig;
use crate::config::validation::validate_config;

#[derive(Debug, Parser)]
#[command(name = "markdown-server")]
#[command(about = "Serve a directory of Markdown files as HTML", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Host to listen on [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base directory to serve files from [default: .]
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the ignore file and templates [default: .markdown-server]
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Build the effective configuration.
    pub fn load(&self) -> Result<ServerConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        let config = self.apply(config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Overlay the flags that were given on top of `config`.
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(dir) = &self.dir {
            config.content.root = dir.clone();
        }
        if let Some(config_dir) = &self.config_dir {
            config.content.config_dir = config_dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        config
    }
}
