//! Core table engine
//!
//! - `table`: row splitting, table building and rowspan resolution
//! - `processor`: finding table blocks inside a document
//! - `options`: conversion options

pub mod options;
pub mod processor;
pub mod table;

pub use options::{TableOptions, DEFAULT_CAPTION_MARK};
pub use processor::{
    convert_document, convert_document_with, split_blocks, Block, BlockProcessor,
    SpanTableProcessor,
};
pub use table::{build_table, CellAlign, GridCell, GridRow, Section, SectionKind, Table};
