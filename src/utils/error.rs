//! Error handling for Tablespan
//!
//! This module provides a unified error type and result type for table
//! construction and document processing.

use std::fmt;

/// Table construction error type
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// The block has no separator (alignment) row
    MissingSeparator {
        /// Number of lines in the rejected block
        lines: usize,
    },
    /// The block does not look like a table at all
    NotATable { message: String },
    /// A configuration value was rejected
    InvalidOption { option: String, message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MissingSeparator { lines } => {
                write!(
                    f,
                    "No separator row found in table block of {} line{}",
                    lines,
                    if *lines == 1 { "" } else { "s" }
                )
            }
            TableError::NotATable { message } => {
                write!(f, "Not a table: {}", message)
            }
            TableError::InvalidOption { option, message } => {
                write!(f, "Invalid option '{}': {}", option, message)
            }
            TableError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for TableError {}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionWarning {
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    /// Attach the 1-indexed document line the warning refers to
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "Warning at line {}: {}", l, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl TableError {
    pub fn missing_separator(lines: usize) -> Self {
        TableError::MissingSeparator { lines }
    }

    pub fn not_a_table(message: impl Into<String>) -> Self {
        TableError::NotATable {
            message: message.into(),
        }
    }

    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        TableError::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_separator_display() {
        let err = TableError::missing_separator(3);
        assert_eq!(
            err.to_string(),
            "No separator row found in table block of 3 lines"
        );
        assert!(TableError::missing_separator(1)
            .to_string()
            .ends_with("1 line"));
    }

    #[test]
    fn test_invalid_option_display() {
        let err = TableError::invalid_option("caption_mark", "must not contain a newline");
        let msg = err.to_string();
        assert!(msg.contains("caption_mark"));
        assert!(msg.contains("newline"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.md");
        let err: TableError = io.into();
        assert!(matches!(err, TableError::IoError { .. }));
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_conversion_output() {
        let output = ConversionOutput::new("hello".to_string());
        assert!(!output.has_warnings());

        let output_with_warn = ConversionOutput::with_warnings(
            "hello".to_string(),
            vec![ConversionWarning::new("test warning").at_line(1)],
        );
        assert!(output_with_warn.has_warnings());
        assert_eq!(
            output_with_warn.warnings[0].to_string(),
            "Warning at line 1: test warning"
        );
    }
}
