//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing::Dispatcher (classify)
//!     → server.rs handlers (home, markdown page, image bytes)
//!     → response.rs (errors → status + short body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ServeError;
pub use server::{AppState, HttpServer};
