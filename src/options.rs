//! Layout options for regenerated sections.
//!
//! Only sections that are rebuilt use these options; sections taken from the
//! token cache keep the author's layout untouched.
//!
//! ## Examples
//!
//! ```rust
//! use xcl::RenderOptions;
//!
//! // Default: two-space indent, two blank lines before a new section
//! let options = RenderOptions::new();
//! assert_eq!(options.indent, "  ");
//!
//! let options = RenderOptions::new()
//!     .with_indent(4)
//!     .with_leading_blank_lines(1);
//! assert_eq!(options.indent, "    ");
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for token synthesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Prefix of every field line
    pub indent: String,
    /// Newlines emitted before a section that was never parsed
    pub leading_blank_lines: usize,
    /// Whitespace around `=`, after `:` and before `{`
    pub spacing: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent: "  ".to_string(),
            leading_blank_lines: 2,
            spacing: " ".to_string(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent to `spaces` spaces.
    #[must_use]
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = " ".repeat(spaces);
        self
    }

    #[must_use]
    pub fn with_tab_indent(mut self) -> Self {
        self.indent = "\t".to_string();
        self
    }

    #[must_use]
    pub fn with_leading_blank_lines(mut self, lines: usize) -> Self {
        self.leading_blank_lines = lines;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: impl Into<String>) -> Self {
        self.spacing = spacing.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.indent, "  ");
        assert_eq!(options.leading_blank_lines, 2);
        assert_eq!(options.spacing, " ");
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new().with_tab_indent().with_spacing("");
        assert_eq!(options.indent, "\t");
        assert_eq!(options.spacing, "");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: RenderOptions = serde_json::from_str(r#"{"leading_blank_lines":0}"#).unwrap();
        assert_eq!(options.leading_blank_lines, 0);
        assert_eq!(options.indent, "  ");
    }
}
