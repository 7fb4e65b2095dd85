//! Table options

use crate::utils::error::{TableError, TableResult};

/// Default mark for a caption row
pub const DEFAULT_CAPTION_MARK: &str = ";";

/// Options controlling how a table block is read
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableOptions {
    /// Literal prefix that marks the last row of a block as the caption
    /// Default: ";"
    pub caption_mark: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            caption_mark: DEFAULT_CAPTION_MARK.to_string(),
        }
    }
}

impl TableOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caption_mark(mut self, mark: impl Into<String>) -> Self {
        self.caption_mark = mark.into();
        self
    }

    /// Reject values that can never match a single line
    pub fn validate(&self) -> TableResult<()> {
        if self.caption_mark.contains('\n') || self.caption_mark.contains('\r') {
            return Err(TableError::invalid_option(
                "caption_mark",
                "must not contain a line break",
            ));
        }
        Ok(())
    }

    /// Whether captions are recognized at all; an empty mark disables them
    pub fn captions_enabled(&self) -> bool {
        !self.caption_mark.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TableOptions::default();
        assert_eq!(opts.caption_mark, ";");
        assert!(opts.captions_enabled());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_custom_mark() {
        let opts = TableOptions::new().with_caption_mark("Table:");
        assert_eq!(opts.caption_mark, "Table:");
        assert!(!TableOptions::new().with_caption_mark("").captions_enabled());
    }

    #[test]
    fn test_validate_rejects_line_break() {
        let opts = TableOptions::new().with_caption_mark(";\n");
        assert!(matches!(
            opts.validate(),
            Err(TableError::InvalidOption { .. })
        ));
    }
}
