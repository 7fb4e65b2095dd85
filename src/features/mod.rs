//! Output formats
//!
//! - `html`: HTML tables with `colspan`/`rowspan` attributes
//! - `typst`: Typst `#table` calls with `table.cell` spans

pub mod html;
pub mod typst;

pub use html::{
    escape_html, table_to_html, table_to_html_with, CodeSpanInline, EscapeInline, InlineRenderer,
};
pub use typst::table_to_typst;
