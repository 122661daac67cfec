//! Plain text view measured in terminal columns

use super::{ConfigurableView, IdentifiableView, ListItemView, ModelView};
use unicode_width::UnicodeWidthChar;

/// A text label that wraps to the list width.
///
/// Width is measured in terminal columns (via `unicode-width`) and height in
/// lines times `line_height`, plus vertical padding. Explicit newlines start
/// a new line; an empty text still occupies one line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextView {
    text: String,
    line_height: f64,
    padding: f64,
}

impl Default for TextView {
    fn default() -> Self {
        Self {
            text: String::new(),
            line_height: 1.0,
            padding: 0.0,
        }
    }
}

impl TextView {
    /// Create a view showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the height of one line.
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set padding added above and below the text.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines the text occupies when wrapped to `columns`.
    pub fn line_count(&self, columns: usize) -> usize {
        let columns = columns.max(1);
        self.text
            .split('\n')
            .map(|line| wrapped_lines(line, columns))
            .sum()
    }
}

/// Greedy character wrap; wide characters never straddle a line break.
fn wrapped_lines(line: &str, columns: usize) -> usize {
    let mut lines = 1;
    let mut used = 0;
    for ch in line.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > columns && used > 0 {
            lines += 1;
            used = 0;
        }
        used += width;
    }
    lines
}

impl ModelView for TextView {
    type Model = String;

    fn configure(&mut self, model: &String) {
        self.text.clone_from(model);
    }
}

impl ListItemView for TextView {
    fn fitting_height(&mut self, width: f64) -> f64 {
        // Columns are whole cells; a fractional remainder cannot hold a glyph.
        let columns = width.max(0.0).floor() as usize;
        self.line_count(columns) as f64 * self.line_height + 2.0 * self.padding
    }

    fn as_configurable(&mut self) -> Option<&mut dyn ConfigurableView> {
        Some(self)
    }

    fn prepare_for_reuse(&mut self) {
        self.text.clear();
    }
}

impl IdentifiableView for TextView {}
