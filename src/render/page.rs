//! Full page rendering.

use minijinja::{context, Value};
use std::sync::Arc;

use crate::render::templates::{render, RenderError};

/// Greeting shown on the home view.
pub const HOME_CONTENT: &str = "Hello 👋";

/// Data handed to the page template for one response.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub title: String,
    pub url_path: String,
    pub file_path: String,
    /// Trusted HTML, inserted unescaped.
    pub content: String,
    /// Trusted HTML, inserted unescaped.
    pub menu: String,
}

impl PageContext {
    /// Context for the landing page at `/`.
    pub fn home(url_path: &str, menu: String) -> Self {
        Self {
            title: "Home".to_string(),
            url_path: url_path.to_string(),
            file_path: String::new(),
            content: HOME_CONTENT.to_string(),
            menu,
        }
    }
}

/// Renders pages with the configured page template.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    template: Arc<str>,
}

impl PageRenderer {
    pub fn new(template: Arc<str>) -> Self {
        Self { template }
    }

    pub fn render(&self, page: PageContext) -> Result<Vec<u8>, RenderError> {
        let ctx = context! {
            Title => page.title,
            UrlPath => page.url_path,
            FilePath => page.file_path,
            Content => Value::from_safe_string(page.content),
            Menu => Value::from_safe_string(page.menu),
        };
        render("page.html", &self.template, ctx).map(String::into_bytes)
    }
}
