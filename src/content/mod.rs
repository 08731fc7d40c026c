//! Content subsystem: what gets listed and how Markdown becomes HTML.
//!
//! # Data Flow
//! ```text
//! ignore file
//!     → ignore.rs (IgnoreRules, compiled once)
//!
//! per request:
//!     root + IgnoreRules
//!     → discovery.rs (walk tree, keep eligible *.md)
//!     → menu.rs (link list → menu template)
//!
//!     *.md bytes → markdown.rs → HTML fragment
//! ```

pub mod discovery;
pub mod ignore;
pub mod markdown;
pub mod menu;

pub use ignore::IgnoreRules;
pub use menu::MenuBuilder;
