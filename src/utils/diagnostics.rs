//! Table diagnostics
//!
//! Checks a table block for problems that do not stop conversion but change
//! its result: missing separator rows, rows that fall back to a naive split,
//! surplus cells, and vertical runs that never got their closing marker.
//!
//! ## Example
//!
//! ```rust
//! use tablespan::utils::diagnostics::{check_table, DiagnosticLevel};
//! use tablespan::TableOptions;
//!
//! let result = check_table("| a | b |\n| 1 | 2 |", &TableOptions::default());
//! assert!(result.has_errors());
//! assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
//! ```

use std::fmt;

use crate::core::options::TableOptions;
use crate::core::table::{
    caption_text, find_separator, has_border, has_unpaired_backticks, split_row, GridIndex,
    Section, TableBuilder,
};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the table converts, but not the way it was probably meant
    Warning,
    /// Error - the block is not converted
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// Line number inside the block (1-indexed)
    pub line: Option<usize>,
    /// Column of the table (1-indexed)
    pub column: Option<usize>,
    pub source_text: Option<String>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn in_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(f, "\n  --> line {}, column {}", line, col)?,
            (Some(line), None) => write!(f, "\n  --> line {}", line)?,
            (None, Some(col)) => write!(f, "\n  --> column {}", col)?,
            (None, None) => {}
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(plural(self.infos, "note"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    format!("{} {}{}", count, word, if count == 1 { "" } else { "s" })
}

/// Check one table block for issues
pub fn check_table(block: &str, options: &TableOptions) -> CheckResult {
    let mut result = CheckResult::new();
    let lines: Vec<&str> = block.lines().collect();

    if !lines.first().is_some_and(|l| l.contains('|')) {
        result.add(
            Diagnostic::new(DiagnosticLevel::Error, "block is not a pipe table")
                .at_line(1)
                .with_suggestion("table rows are separated into cells with '|'"),
        );
        return result;
    }

    let Some(sep_index) = find_separator(&lines) else {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!("no separator row in {} lines", lines.len()),
            )
            .with_suggestion("add a separator row such as |---|---| below the header"),
        );
        return result;
    };

    let separator = lines[sep_index];
    let header = &lines[..sep_index];
    let mut body_end = lines.len();
    if sep_index + 1 < lines.len() && caption_text(lines[lines.len() - 1], options).is_some() {
        body_end -= 1;
    }

    let border = has_border(header, separator);
    let builder = TableBuilder::from_separator(separator, border);
    let columns = builder.alignments().len();

    for (i, line) in lines[..body_end].iter().enumerate() {
        if i == sep_index {
            continue;
        }
        check_row(line, i + 1, border, columns, &mut result);
    }

    // Marker rows in the header are kept as text
    for (i, line) in header.iter().enumerate() {
        let row = builder.build_row(line);
        if let Some(slot) = row.cells.iter().position(|c| c.is_rowspan_marker()) {
            let x: usize = row.cells[..slot].iter().map(|c| c.colspan).sum();
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    "rowspan marker in the header is kept as text",
                )
                .at_line(i + 1)
                .in_column(x + 1)
                .with_source(line.trim()),
            );
        }
    }

    let mut body = Section::body();
    for line in &lines[sep_index + 1..body_end] {
        body.push(builder.build_row(line));
    }
    check_open_runs(&body, sep_index + 2, &mut result);

    result
}

/// Per-line checks: naive split fallback and surplus cells
fn check_row(line: &str, line_no: usize, border: bool, columns: usize, result: &mut CheckResult) {
    let trimmed = line.trim();

    if has_unpaired_backticks(trimmed) {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                "odd number of backticks, pipes inside code are treated as separators",
            )
            .at_line(line_no)
            .with_source(trimmed)
            .with_suggestion("close the code span or escape the stray backtick as \\`"),
        );
    }

    let cells = split_row(trimmed, border).len();
    if cells > columns {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!(
                    "row has {} cells but the table has {} columns, extra cells are dropped",
                    cells, columns
                ),
            )
            .at_line(line_no)
            .with_source(trimmed),
        );
    }
}

/// Report columns ending in empty cells below a content cell with no marker.
///
/// `first_line` is the block line number of the first body row.
fn check_open_runs(body: &Section, first_line: usize, result: &mut CheckResult) {
    let grid = GridIndex::build(body);

    for x in 0..grid.columns {
        let mut open: Option<usize> = None;
        let mut empties = 0;

        for y in 0..grid.rows {
            let Some(slot) = grid.get(x, y) else {
                open = None;
                continue;
            };
            let cell = &body.rows[y].cells[slot];
            if cell.is_empty() {
                empties += 1;
            } else if cell.is_rowspan_marker() {
                open = None;
            } else {
                open = Some(y);
                empties = 0;
            }
        }

        if let Some(start) = open {
            if empties > 0 {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Info,
                        format!(
                            "{} empty cell{} below this cell are not merged",
                            empties,
                            if empties == 1 { "" } else { "s" }
                        ),
                    )
                    .at_line(first_line + start)
                    .in_column(x + 1)
                    .with_suggestion("end the column with a '_' cell to make a rowspan"),
                );
            }
        }
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(block: &str) -> CheckResult {
        check_table(block, &TableOptions::default())
    }

    #[test]
    fn test_clean_table() {
        let result = check("| a | b |\n|---|---|\n| X | 1 |\n|   | 2 |\n| _ | 3 |\n; Caption");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_missing_separator() {
        let result = check("| a | b |\n| 1 | 2 |\n| 3 | 4 |");
        assert!(result.has_errors());
        assert_eq!(result.errors, 1);
        assert!(result.diagnostics[0].suggestion.is_some());
    }

    #[test]
    fn test_not_a_table() {
        let result = check("just a paragraph\nof text");
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].line, Some(1));
    }

    #[test]
    fn test_unpaired_backticks() {
        let result = check("| a | b |\n|---|---|\n| `x | y |");
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].line, Some(3));
    }

    #[test]
    fn test_surplus_cells() {
        let result = check("| a | b |\n|---|---|\n| 1 | 2 | 3 |");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("3 cells"));
    }

    #[test]
    fn test_open_run_reported() {
        let result = check("| a | b |\n|---|---|\n| X | 1 |\n|   | 2 |\n|   | 3 |");
        assert_eq!(result.infos, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.line, Some(3));
        assert_eq!(diag.column, Some(1));
        assert!(diag.message.starts_with("2 empty cells"));
    }

    #[test]
    fn test_marker_in_header() {
        let result = check("| a | b |\n| _ | c |\n|---|---|\n| 1 | 2 |");
        assert_eq!(result.infos, 1);
        assert_eq!(result.diagnostics[0].line, Some(2));
    }

    #[test]
    fn test_caption_line_is_not_checked() {
        let result = check("| a | b |\n|---|---|\n| 1 | 2 |\n; caption with | x | y | z |");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        assert_eq!(result.summary(), "1 error, 2 warnings");
    }

    #[test]
    fn test_format_diagnostics() {
        let result = check("| a | b |\n|---|---|\n| 1 | 2 | 3 |");
        let plain = format_diagnostics(&result, false);
        assert!(plain.starts_with("warning: row has 3 cells"));
        assert!(plain.contains("--> line 3"));
        assert!(plain.ends_with("Summary: 1 warning"));

        let colored = format_diagnostics(&result, true);
        assert!(colored.starts_with("\x1b[33m"));
    }
}
