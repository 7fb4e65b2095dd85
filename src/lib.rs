//! # tablespan
//!
//! Markdown pipe tables with cell spans and captions.
//!
//! ## Features
//!
//! - **Colspans**: an empty cell (`||`) widens the cell to its left
//! - **Rowspans**: empty cells below a cell, closed by a `_` cell, merge into it
//! - **Captions**: a last line starting with `;` becomes the table caption
//! - **Code-aware splitting**: pipes inside `` `code` `` stay in the cell
//! - **Outputs**: HTML and Typst, plus diagnostics for malformed tables
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Single Table
//!
//! ```rust
//! use tablespan::{markdown_table_to_html, TableOptions};
//!
//! let html = markdown_table_to_html(
//!     "| Name | Qty |\n|------|----:|\n| Bolt | 4 |\n|      | 6 |\n| _    | 8 |\n; Parts",
//!     &TableOptions::default(),
//! )
//! .unwrap();
//! assert!(html.contains("<caption>Parts</caption>"));
//! assert!(html.contains("<td rowspan=\"3\">Bolt</td>"));
//! ```
//!
//! ### Full Document Conversion
//!
//! ```rust
//! use tablespan::{convert_document, TableOptions};
//!
//! let output = convert_document(
//!     "Intro text.\n\n| a | b |\n|---|---|\n| both ||\n",
//!     &TableOptions::default(),
//! );
//! assert!(output.content.starts_with("Intro text.\n\n<table>"));
//! assert!(!output.has_warnings());
//! ```

/// Core table engine
pub mod core;

/// Output formats
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types and functions
pub use crate::core::options::TableOptions;
pub use crate::core::processor::{
    convert_document, convert_document_with, split_blocks, BlockProcessor, SpanTableProcessor,
};
pub use crate::core::table::{build_table, CellAlign, GridCell, GridRow, Section, Table};

// Re-export renderers
pub use features::html;
pub use features::typst;
pub use features::{table_to_html, table_to_html_with, table_to_typst, InlineRenderer};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::diagnostics::{check_table, format_diagnostics};
pub use utils::error::{ConversionOutput, ConversionWarning, TableError, TableResult};

/// Parse one table block
///
/// # Arguments
/// * `text` - The lines of the block, newline separated
/// * `options` - Conversion options
///
/// # Errors
/// `TableError::MissingSeparator` when no line is a separator row,
/// `TableError::NotATable` for blank input
pub fn parse_table(text: &str, options: &TableOptions) -> TableResult<Table> {
    options.validate()?;
    if text.trim().is_empty() {
        return Err(TableError::not_a_table("input is blank"));
    }
    let lines: Vec<&str> = text.lines().collect();
    build_table(&lines, options)
}

/// Convert one table block to HTML
pub fn markdown_table_to_html(text: &str, options: &TableOptions) -> TableResult<String> {
    parse_table(text, options).map(|table| table_to_html(&table))
}

/// Convert one table block to Typst
pub fn markdown_table_to_typst(text: &str, options: &TableOptions) -> TableResult<String> {
    parse_table(text, options).map(|table| table_to_typst(&table))
}
