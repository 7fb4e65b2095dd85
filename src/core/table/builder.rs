//! Table construction from a block of pipe-table lines

use lazy_static::lazy_static;
use regex::Regex;

use super::cell::{CellAlign, GridCell, GridRow, Table};
use super::spans::resolve_rowspans;
use super::splitter::{split_row, DELIMITER};
use crate::core::options::TableOptions;
use crate::utils::error::{TableError, TableResult};

lazy_static! {
    /// Alignment row: at least two `:?-+:?` cells, border pipes optional
    static ref SEPARATOR_PATTERN: Regex =
        Regex::new(r"^\s*\|?\s*:?-+:?\s*(?:\|\s*:?-+:?\s*)+\|?\s*$").unwrap();
}

/// Whether `line` is a separator (alignment) row
pub fn is_separator_row(line: &str) -> bool {
    SEPARATOR_PATTERN.is_match(line)
}

/// Index of the first separator row in `lines`
pub fn find_separator<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    lines.iter().position(|l| is_separator_row(l.as_ref()))
}

/// Caption carried by `line`, if it starts with the caption mark.
///
/// The mark must open the line itself; an indented mark is a body row. Every
/// occurrence of the mark is removed from the caption. Always `None` when the
/// mark is empty.
pub fn caption_text(line: &str, options: &TableOptions) -> Option<String> {
    if !options.captions_enabled() {
        return None;
    }
    let mark = options.caption_mark.as_str();
    line.starts_with(mark)
        .then(|| line.replace(mark, "").trim().to_string())
}

/// Border style of a block: decided by its first header line, or by the
/// separator when there are no header lines
pub fn has_border(header: &[&str], separator: &str) -> bool {
    let first = header.first().copied().unwrap_or(separator);
    first.trim().starts_with(DELIMITER)
}

/// Row builder for one table.
///
/// Holds the column alignments and the border style of the block; every row
/// it builds is exactly as wide as the alignment list.
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    /// Create a builder with the given column alignments
    pub fn new(alignments: Vec<CellAlign>, border: bool) -> Self {
        let mut table = Table::new(alignments);
        table.border = border;
        TableBuilder { table }
    }

    /// Create a builder from a separator row
    pub fn from_separator(separator: &str, border: bool) -> Self {
        let alignments = split_row(separator.trim(), border)
            .into_iter()
            .map(CellAlign::from_separator)
            .collect();
        Self::new(alignments, border)
    }

    /// Column alignments read from the separator row
    pub fn alignments(&self) -> &[CellAlign] {
        &self.table.alignments
    }

    /// Attach the caption text
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.table.caption = Some(caption.into());
    }

    /// Split a line and build its cells, applying colspans.
    ///
    /// An empty split result (`||`) widens the cell before it. A missing
    /// result at the end of a short row becomes an empty cell, as does a
    /// whitespace-only one.
    pub fn build_row(&self, line: &str) -> GridRow {
        let raw = split_row(line.trim(), self.table.border);
        let mut row = GridRow::new();

        for (i, align) in self.table.alignments.iter().enumerate() {
            let text = match raw.get(i) {
                Some(&"") => match row.cells.last_mut() {
                    Some(prev) => {
                        prev.colspan += 1;
                        continue;
                    }
                    // Nothing to extend in the first column
                    None => "",
                },
                Some(text) => text.trim(),
                None => "",
            };
            row.push(GridCell::new(text).with_align(*align));
        }

        if raw.len() > self.table.alignments.len() {
            log::debug!(
                "row has {} cells but table has {} columns, extra cells dropped",
                raw.len(),
                self.table.alignments.len()
            );
        }

        row
    }

    pub fn push_header_row(&mut self, line: &str) {
        let row = self.build_row(line);
        self.table.header.push(row);
    }

    pub fn push_body_row(&mut self, line: &str) {
        let row = self.build_row(line);
        self.table.body.push(row);
    }

    /// Resolve rowspans in the body and hand out the finished table
    pub fn finish(mut self) -> Table {
        resolve_rowspans(&mut self.table.body);
        self.table
    }
}

/// Build a table from the raw lines of one block.
///
/// Fails only when the block has no separator row.
pub fn build_table<S: AsRef<str>>(lines: &[S], options: &TableOptions) -> TableResult<Table> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let sep_index =
        find_separator(&lines).ok_or_else(|| TableError::missing_separator(lines.len()))?;

    let separator = lines[sep_index];
    let header = &lines[..sep_index];
    let mut body: Vec<&str> = lines[sep_index + 1..].to_vec();

    let caption = body.last().and_then(|last| caption_text(last, options));
    if caption.is_some() {
        body.pop();
    }

    let border = has_border(header, separator);

    let mut builder = TableBuilder::from_separator(separator, border);
    log::debug!(
        "table block: separator at line {}, {} columns, border: {}, {} body rows",
        sep_index,
        builder.alignments().len(),
        border,
        body.len()
    );

    if let Some(caption) = caption {
        log::debug!("table caption: {:?}", caption);
        builder.set_caption(caption);
    }
    for line in header {
        builder.push_header_row(line);
    }
    for line in &body {
        builder.push_body_row(line);
    }

    Ok(builder.finish())
}
