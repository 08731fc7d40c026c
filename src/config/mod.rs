//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → cli.rs (command-line flags override file values)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → consumed once by lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the server runs with no config at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{ContentConfig, ListenerConfig, ObservabilityConfig, ServerConfig, TimeoutConfig};
