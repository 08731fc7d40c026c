//! Template sources and the rendering engine.
//!
//! Templates are Jinja (`minijinja`). Template names end in `.html`, so every
//! value is HTML-escaped unless it was built with
//! [`Value::from_safe_string`]; callers pass rendered Markdown and menu HTML
//! that way so they come out as markup.

use minijinja::{Environment, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ Title }}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.slate.min.css">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/default.min.css">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js"></script>
    <script>hljs.highlightAll();</script>
</head>
<body>
    <main class="container">
        <header>{{ Menu }}</header>
        <article>
            {{ Content }}
        </article>
    </main>
</body>
</html>
"#;

pub const DEFAULT_MENU_TEMPLATE: &str = r#"<details class="dropdown">
    <summary role="button" class="contrast">📁 {{ UrlPath }}</summary>
    {{ Menu }}
</details>
"#;

/// Page and menu template sources, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Templates {
    pub page: Arc<str>,
    pub menu: Arc<str>,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            page: Arc::from(DEFAULT_PAGE_TEMPLATE),
            menu: Arc::from(DEFAULT_MENU_TEMPLATE),
        }
    }
}

impl Templates {
    /// Load templates from disk, falling back to the built-in defaults.
    pub fn load(page_path: &Path, menu_path: &Path) -> Self {
        Self {
            page: load_source(page_path, DEFAULT_PAGE_TEMPLATE),
            menu: load_source(menu_path, DEFAULT_MENU_TEMPLATE),
        }
    }
}

fn load_source(path: &Path, default: &str) -> Arc<str> {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::info!(path = %path.display(), "Using custom template");
            Arc::from(content)
        }
        Err(_) => {
            tracing::info!(path = %path.display(), "Template not found, using default");
            Arc::from(default)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to parse template {name}: {source}")]
    Parse {
        name: &'static str,
        source: minijinja::Error,
    },
    #[error("failed to execute template {name}: {source}")]
    Execute {
        name: &'static str,
        source: minijinja::Error,
    },
}

/// Render `source` with `ctx` into a complete string.
///
/// Nothing is written anywhere until the whole output exists, so a failure
/// never leaves a half-sent page behind.
pub fn render(name: &'static str, source: &str, ctx: Value) -> Result<String, RenderError> {
    let mut env = Environment::new();
    env.add_template(name, source)
        .map_err(|source| RenderError::Parse { name, source })?;
    let template = env
        .get_template(name)
        .map_err(|source| RenderError::Parse { name, source })?;
    template
        .render(ctx)
        .map_err(|source| RenderError::Execute { name, source })
}
