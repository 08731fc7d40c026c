//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     .markdown-server/index.html, menu.html (or built-in defaults)
//!     → templates.rs (Templates, immutable)
//!
//! per request:
//!     PageContext { Title, UrlPath, FilePath, Content, Menu }
//!     → page.rs (PageRenderer)
//!     → buffered HTML bytes
//! ```

pub mod page;
pub mod templates;

pub use page::{PageContext, PageRenderer};
pub use templates::{RenderError, Templates};
