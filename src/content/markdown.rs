//! Markdown to HTML conversion.

use pulldown_cmark::{html, Options, Parser};

#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    #[error("markdown source is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Converts Markdown bytes to an HTML fragment.
///
/// Raw HTML in the source is passed through: the served tree belongs to the
/// user reading it.
pub fn to_html(source: &[u8]) -> Result<String, MarkdownError> {
    let text = std::str::from_utf8(source)?;

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    Ok(out)
}
