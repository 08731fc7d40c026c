//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known log levels)
//! - Check addresses parse before anything binds them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Filesystem checks (does the root exist?) belong to startup, not here

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
