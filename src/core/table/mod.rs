//! Span Table System
//!
//! Builds tables with horizontal and vertical spans from markdown pipe rows.
//!
//! - `||` (an empty split result) extends the cell to its left (colspan)
//! - a `_` cell closes a vertical run of empty cells below a content cell
//!   (rowspan)
//! - pipes inside inline code spans are cell content
//!
//! # Architecture
//!
//! ```text
//! Block lines -> Row Splitter -> Table Builder (colspans) -> Span Resolver (rowspans) -> Table
//! ```
//!
//! # Example
//!
//! ```
//! use tablespan::core::table::build_table;
//! use tablespan::TableOptions;
//!
//! let lines = ["| A | B |", "|---|---|", "| wide ||"];
//! let table = build_table(&lines, &TableOptions::default()).unwrap();
//! assert_eq!(table.body.rows[0].cells[0].colspan, 2);
//! ```

mod builder;
mod cell;
mod spans;
pub mod splitter;


// Re-export public API
pub use builder::{
    build_table, caption_text, find_separator, has_border, is_separator_row, TableBuilder,
};
pub use cell::{CellAlign, GridCell, GridRow, Section, SectionKind, Table};
pub use spans::{resolve_rowspans, GridIndex};
pub use splitter::{has_unpaired_backticks, match_code_span, skip_literal_backticks, split_row};
