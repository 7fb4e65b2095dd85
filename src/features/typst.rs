//! Typst rendering of span tables

use std::fmt::Write;

use crate::core::table::{
    has_unpaired_backticks, match_code_span, skip_literal_backticks, CellAlign, GridCell, GridRow,
    Table,
};
use crate::features::html::code_content;

/// Convert Table to Typst
pub fn table_to_typst(table: &Table) -> String {
    let mut output = String::new();
    let indent = if table.caption.is_some() { "  " } else { "" };

    // Figure wrapper if we have caption
    if table.caption.is_some() {
        output.push_str("#figure(\n");
        output.push_str("  table(\n");
    } else {
        output.push_str("#table(\n");
    }

    let _ = writeln!(output, "{}  columns: {},", indent, table.num_cols().max(1));

    if table.alignments.iter().any(|a| *a != CellAlign::Auto) {
        let aligns: Vec<&str> = table.alignments.iter().map(|a| a.to_typst()).collect();
        let _ = writeln!(output, "{}  align: ({}),", indent, aligns.join(", "));
    }

    if !table.header.is_empty() {
        let _ = writeln!(output, "{}  table.header(", indent);
        for row in &table.header.rows {
            let _ = writeln!(output, "{}    {}", indent, row_to_typst(row));
        }
        let _ = writeln!(output, "{}  ),", indent);
    }

    for row in &table.body.rows {
        if !row.cells.is_empty() {
            let _ = writeln!(output, "{}  {}", indent, row_to_typst(row));
        }
    }

    if let Some(ref caption) = table.caption {
        output.push_str("  ),\n");
        let _ = writeln!(output, "  caption: [{}],", escape_typst(caption));
    }
    output.push_str(")\n");

    output
}

/// Convert a row to Typst
fn row_to_typst(row: &GridRow) -> String {
    let cells: Vec<String> = row.cells.iter().map(cell_to_typst).collect();
    format!("{},", cells.join(", "))
}

/// Convert a cell to Typst
fn cell_to_typst(cell: &GridCell) -> String {
    let content = format!("[{}]", escape_typst(&cell.text));
    if !cell.is_spanning() {
        return content;
    }

    let mut args = Vec::new();
    if cell.colspan > 1 {
        args.push(format!("colspan: {}", cell.colspan));
    }
    if cell.rowspan > 1 {
        args.push(format!("rowspan: {}", cell.rowspan));
    }
    format!("table.cell({}){}", args.join(", "), content)
}

/// Escape markup characters that would break out of a content block.
///
/// Balanced code spans become Typst raw text and are not escaped. Backticks
/// that open no span are escaped like any other markup character.
fn escape_typst(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    if has_unpaired_backticks(text) {
        escape_markup(text, &mut out);
        return out;
    }

    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        match match_code_span(text, i) {
            Some(end) => {
                escape_markup(&text[literal_start..i], &mut out);
                push_raw(&text[i..end], &mut out);
                i = end;
                literal_start = end;
            }
            None => i = skip_literal_backticks(text, i),
        }
    }
    escape_markup(&text[literal_start..], &mut out);
    out
}

fn escape_markup(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, '[' | ']' | '#' | '$' | '\\' | '<' | '@' | '*' | '_' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Re-fence a markdown code span for Typst.
///
/// Typst reads two backticks as empty raw text and three or more as a raw
/// block, so single-backtick spans are kept and wider ones are rewritten.
fn push_raw(span: &str, out: &mut String) {
    let width = span.bytes().take_while(|&b| b == b'`').count();
    if width == 1 {
        out.push_str(span);
        return;
    }
    let content = code_content(&span[width..span.len() - width]);
    if content.contains('`') {
        let _ = write!(out, "``` {} ```", content);
    } else {
        let _ = write!(out, "`{}`", content);
    }
}
