//! HTML rendering of span tables
//!
//! Produces one element per line:
//!
//! ```text
//! <table>
//! <caption>..</caption>
//! <thead>
//! <tr>
//! <th align="center">..</th>
//! </tr>
//! </thead>
//! <tbody>
//! <tr>
//! <td colspan="2" rowspan="3">..</td>
//! </tr>
//! </tbody>
//! </table>
//! ```
//!
//! Cell text is passed through an [`InlineRenderer`]. Only escaping and code
//! spans are handled here; richer inline markup belongs to the caller.

use phf::phf_map;

use crate::core::table::{
    has_unpaired_backticks, match_code_span, skip_literal_backticks, GridCell, Section,
    SectionKind, Table,
};

static HTML_ESCAPES: phf::Map<char, &'static str> = phf_map! {
    '&' => "&amp;",
    '<' => "&lt;",
    '>' => "&gt;",
    '"' => "&quot;",
};

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match HTML_ESCAPES.get(&c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Renders the inline content of a cell or caption
pub trait InlineRenderer {
    fn render(&self, text: &str) -> String;
}

/// Plain text: escape and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeInline;

impl InlineRenderer for EscapeInline {
    fn render(&self, text: &str) -> String {
        escape_html(text)
    }
}

/// Escape, and turn balanced backtick spans into `<code>` elements
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeSpanInline;

impl InlineRenderer for CodeSpanInline {
    fn render(&self, text: &str) -> String {
        if has_unpaired_backticks(text) {
            return escape_html(text);
        }

        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'`' {
                i += 1;
                continue;
            }
            match match_code_span(text, i) {
                Some(end) => {
                    let open_end = i + bytes[i..].iter().take_while(|&&b| b == b'`').count();
                    let width = open_end - i;
                    out.push_str(&escape_html(&text[literal_start..i]));
                    out.push_str("<code>");
                    out.push_str(&escape_html(code_content(&text[open_end..end - width])));
                    out.push_str("</code>");
                    i = end;
                    literal_start = end;
                }
                None => i = skip_literal_backticks(text, i),
            }
        }
        out.push_str(&escape_html(&text[literal_start..]));
        out
    }
}

/// Strip one space on each side when both are present and the content is
/// not only spaces
pub(crate) fn code_content(inner: &str) -> &str {
    if inner.len() >= 2
        && inner.starts_with(' ')
        && inner.ends_with(' ')
        && !inner.bytes().all(|b| b == b' ')
    {
        &inner[1..inner.len() - 1]
    } else {
        inner
    }
}

/// Convert a table to HTML with code span support
pub fn table_to_html(table: &Table) -> String {
    table_to_html_with(table, &CodeSpanInline)
}

/// Convert a table to HTML with a custom inline renderer
pub fn table_to_html_with(table: &Table, inline: &dyn InlineRenderer) -> String {
    let mut output = String::new();

    output.push_str("<table>\n");
    if let Some(ref caption) = table.caption {
        output.push_str(&format!("<caption>{}</caption>\n", inline.render(caption)));
    }
    section_to_html(&mut output, &table.header, inline);
    section_to_html(&mut output, &table.body, inline);
    output.push_str("</table>\n");

    output
}

fn section_to_html(output: &mut String, section: &Section, inline: &dyn InlineRenderer) {
    let (wrapper, tag) = match section.kind {
        SectionKind::Header => ("thead", "th"),
        SectionKind::Body => ("tbody", "td"),
    };

    output.push_str(&format!("<{}>\n", wrapper));
    for row in &section.rows {
        output.push_str("<tr>\n");
        for cell in &row.cells {
            output.push_str(&cell_to_html(cell, tag, inline));
            output.push('\n');
        }
        output.push_str("</tr>\n");
    }
    output.push_str(&format!("</{}>\n", wrapper));
}

/// Convert a cell to HTML
fn cell_to_html(cell: &GridCell, tag: &str, inline: &dyn InlineRenderer) -> String {
    let mut attrs = String::new();
    if cell.colspan > 1 {
        attrs.push_str(&format!(" colspan=\"{}\"", cell.colspan));
    }
    if cell.rowspan > 1 {
        attrs.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
    }
    if let Some(align) = cell.align.as_attr() {
        attrs.push_str(&format!(" align=\"{}\"", align));
    }

    format!("<{tag}{attrs}>{}</{tag}>", inline.render(&cell.text))
}
