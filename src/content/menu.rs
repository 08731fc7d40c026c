//! Navigation menu generation.

use minijinja::{context, Value};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use crate::content::discovery::discover;
use crate::content::ignore::{relative_key, IgnoreRules};
use crate::render::templates::render;

/// Characters escaped when a relative path becomes a link target.
const LINK_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Builds the menu listing every eligible Markdown file.
#[derive(Debug, Clone)]
pub struct MenuBuilder {
    rules: Arc<IgnoreRules>,
    template: Arc<str>,
}

impl MenuBuilder {
    pub fn new(rules: Arc<IgnoreRules>, template: Arc<str>) -> Self {
        Self { rules, template }
    }

    /// Walk `root` and render the menu for a request to `url_path`.
    ///
    /// Returns an empty string if the menu template fails; the page is
    /// still served, just without navigation.
    pub fn build(&self, root: &Path, url_path: &str) -> String {
        let list = self.file_list(root);
        let ctx = context! {
            UrlPath => url_path,
            Menu => Value::from_safe_string(list),
        };

        match render("menu.html", &self.template, ctx) {
            Ok(menu) => menu,
            Err(e) => {
                tracing::error!(error = %e, "Failed to render menu");
                String::new()
            }
        }
    }

    /// The bare `<ul>` of links, before templating.
    pub fn file_list(&self, root: &Path) -> String {
        let mut list = String::from("<ul>");
        for file in discover(root, &self.rules) {
            let rel = relative_key(root, &file);
            let href = format!("/{}", utf8_percent_encode(&rel, LINK_ESCAPES));
            let _ = write!(
                list,
                r#"<li class="file"><a href="{}">📄 {}</a></li>"#,
                html_escape::encode_double_quoted_attribute(&href),
                html_escape::encode_text(&rel),
            );
        }
        list.push_str("</ul>");
        list
    }
}
