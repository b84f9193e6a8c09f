//! Markup rendering for entry text.
//!
//! Rendering is delegated to a [`MarkupRenderer`] looked up by markup type tag in a
//! [`MarkupRegistry`]. The crate ships two renderers: `plain` (escaped text with
//! paragraphs and line breaks) and `html` (trusted, passed through). Richer formats
//! are registered by the surrounding application.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type tag of the built-in plain text renderer
pub const PLAIN: &str = "plain";
/// Type tag of the built-in pass-through HTML renderer
pub const HTML: &str = "html";

/// Raw text paired with its markup type and rendered output
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupText {
    pub raw: String,
    pub markup_type: String,
    pub rendered: String,
}

/// Turns raw markup of one type into HTML
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, raw: &str) -> String;
}

/// Escapes HTML and turns blank-line separated blocks into paragraphs.
#[derive(Debug, Default)]
pub struct PlainRenderer;

impl MarkupRenderer for PlainRenderer {
    fn render(&self, raw: &str) -> String {
        let mut out = String::new();
        for block in raw.split("\n\n").map(str::trim).filter(|b| !b.is_empty()) {
            let lines: Vec<String> = block.lines().map(escape_html).collect();
            out.push_str("<p>");
            out.push_str(&lines.join("<br />"));
            out.push_str("</p>");
        }
        out
    }
}

/// Passes text through unchanged; used for entries written in the rich text editor.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl MarkupRenderer for HtmlRenderer {
    fn render(&self, raw: &str) -> String {
        raw.to_string()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renderers keyed by markup type tag
pub struct MarkupRegistry {
    renderers: HashMap<String, Box<dyn MarkupRenderer>>,
    default_type: String,
}

impl MarkupRegistry {
    /// Creates an empty registry whose default type is `default_type`.
    #[must_use]
    pub fn new(default_type: impl Into<String>) -> Self {
        Self {
            renderers: HashMap::new(),
            default_type: default_type.into(),
        }
    }

    /// Registers (or replaces) the renderer for `markup_type`.
    #[must_use]
    pub fn with(mut self, markup_type: impl Into<String>, renderer: impl MarkupRenderer + 'static) -> Self {
        self.renderers.insert(markup_type.into(), Box::new(renderer));
        self
    }

    /// Replaces the markup type used when an entry does not name one.
    #[must_use]
    pub fn with_default_type(mut self, default_type: impl Into<String>) -> Self {
        self.default_type = default_type.into();
        self
    }

    /// Markup type used when an entry does not name one
    #[must_use]
    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    #[must_use]
    pub fn supports(&self, markup_type: &str) -> bool {
        self.renderers.contains_key(markup_type)
    }

    /// Renders `raw` with the renderer registered for `markup_type`.
    ///
    /// # Errors
    /// Returns `Error::InvalidField` if no renderer is registered for the type.
    pub fn render(&self, raw: &str, markup_type: &str) -> Result<MarkupText> {
        let renderer = self.renderers.get(markup_type).ok_or_else(|| {
            Error::invalid("text_markup_type", format!("unknown markup type '{markup_type}'"))
        })?;
        Ok(MarkupText {
            raw: raw.to_string(),
            markup_type: markup_type.to_string(),
            rendered: renderer.render(raw),
        })
    }
}

impl Default for MarkupRegistry {
    fn default() -> Self {
        Self::new(PLAIN)
            .with(PLAIN, PlainRenderer)
            .with(HTML, HtmlRenderer)
    }
}

impl std::fmt::Debug for MarkupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&String> = self.renderers.keys().collect();
        types.sort();
        f.debug_struct("MarkupRegistry")
            .field("types", &types)
            .field("default_type", &self.default_type)
            .finish()
    }
}
