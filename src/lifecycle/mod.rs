//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → resolve root → load ignore rules + templates → bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Everything request handlers read is ready before the listener binds

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bind, build_state, StartupError};
