//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, URI path)
//!     → dispatcher.rs (method check)
//!     → resolver.rs (decode, clean, sandbox under root)
//!     → dispatcher.rs (ignore rules, classify by extension)
//!     → Return: RenderAction (Home | Markdown | Image | Reject)
//! ```
//!
//! # Design Decisions
//! - Root and rules fixed at startup, immutable at runtime
//! - Deterministic: same request always yields the same action
//! - No filesystem access while routing

pub mod dispatcher;
pub mod resolver;

pub use dispatcher::{Dispatcher, RenderAction};
pub use resolver::resolve;
