//! Markdown Server Library
//!
//! Serves a directory of Markdown notes as HTML pages with a generated
//! navigation menu, raw images alongside, and regex ignore rules hiding
//! whatever should stay private.

pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
