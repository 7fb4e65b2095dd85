//! Block processing: recognizing table blocks inside a document
//!
//! A document is cut into blocks at blank lines. Each block is offered to a
//! [`BlockProcessor`]; the span table processor claims blocks that look like
//! pipe tables and turns them into [`Table`]s.

use super::options::TableOptions;
use super::table::{build_table, Table};
use crate::utils::error::{ConversionOutput, ConversionWarning, TableResult};

/// Name under which the span table processor is known to a pipeline
pub const TABLE_PROCESSOR_NAME: &str = "table";

/// Ordering value of the span table processor; higher runs earlier
pub const TABLE_PROCESSOR_PRIORITY: u32 = 75;

/// A pipeline stage that claims and converts blocks of lines
pub trait BlockProcessor {
    type Output;

    fn name(&self) -> &'static str;

    fn priority(&self) -> u32;

    /// Cheap check whether this processor wants the block
    fn test(&self, lines: &[&str]) -> bool;

    /// Convert a block that passed [`BlockProcessor::test`]
    fn run(&self, lines: &[&str]) -> TableResult<Self::Output>;
}

/// Processor for pipe tables with spans and captions
#[derive(Debug, Clone, Default)]
pub struct SpanTableProcessor {
    pub options: TableOptions,
}

impl SpanTableProcessor {
    pub fn new(options: TableOptions) -> Self {
        SpanTableProcessor { options }
    }
}

impl BlockProcessor for SpanTableProcessor {
    type Output = Table;

    fn name(&self) -> &'static str {
        TABLE_PROCESSOR_NAME
    }

    fn priority(&self) -> u32 {
        TABLE_PROCESSOR_PRIORITY
    }

    /// More than two lines, and a pipe in the first one
    fn test(&self, lines: &[&str]) -> bool {
        lines.len() > 2 && lines[0].contains('|')
    }

    fn run(&self, lines: &[&str]) -> TableResult<Table> {
        build_table(lines, &self.options)
    }
}

/// A run of non-blank lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// 0-indexed line of the document where the block starts
    pub start: usize,
    pub lines: Vec<&'a str>,
}

impl Block<'_> {
    /// 1-indexed line number for messages
    pub fn line_number(&self) -> usize {
        self.start + 1
    }

    /// Index of the first document line after the block
    pub fn end(&self) -> usize {
        self.start + self.lines.len()
    }
}

/// Split a document into blocks separated by blank lines
pub fn split_blocks(document: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (i, line) in document.lines().enumerate() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Block {
                start: i,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }
    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

/// Replace every table block of `document` with rendered markup.
///
/// Blank lines and non-table blocks are copied unchanged. A block that looks
/// like a table but has no separator row is kept as text and reported as a
/// warning.
pub fn convert_document_with<P, F>(document: &str, processor: &P, render: F) -> ConversionOutput
where
    P: BlockProcessor,
    F: Fn(&P::Output) -> String,
{
    let lines: Vec<&str> = document.lines().collect();
    let mut content = String::with_capacity(document.len());
    let mut warnings = Vec::new();
    let mut cursor = 0;

    for block in split_blocks(document) {
        for line in &lines[cursor..block.start] {
            content.push_str(line);
            content.push('\n');
        }
        cursor = block.end();

        if !processor.test(&block.lines) {
            push_lines(&mut content, &block.lines);
            continue;
        }

        match processor.run(&block.lines) {
            Ok(output) => {
                content.push_str(render(&output).trim_end());
                content.push('\n');
            }
            Err(err) => {
                log::warn!(
                    "{} block at line {} left as text: {}",
                    processor.name(),
                    block.line_number(),
                    err
                );
                warnings.push(
                    ConversionWarning::new(err.to_string())
                        .at_line(block.line_number())
                        .with_suggestion("add a separator row such as |---|---|"),
                );
                push_lines(&mut content, &block.lines);
            }
        }
    }
    for line in &lines[cursor..] {
        content.push_str(line);
        content.push('\n');
    }

    if !document.ends_with('\n') {
        content.pop();
    }

    ConversionOutput::with_warnings(content, warnings)
}

/// Replace every table block of `document` with HTML
pub fn convert_document(document: &str, options: &TableOptions) -> ConversionOutput {
    let processor = SpanTableProcessor::new(options.clone());
    convert_document_with(document, &processor, crate::features::html::table_to_html)
}

fn push_lines(content: &mut String, lines: &[&str]) {
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_processor_identity() {
        let processor = SpanTableProcessor::default();
        assert_eq!(processor.name(), "table");
        assert_eq!(processor.priority(), 75);
        assert_eq!(processor.options.caption_mark, ";");
    }

    #[test]
    fn test_processor_test() {
        let processor = SpanTableProcessor::default();
        assert!(processor.test(&["| a |", "|---|---|", "| 1 |"]));
        assert!(!processor.test(&["| a |", "|---|---|"]));
        assert!(!processor.test(&["a", "|---|---|", "| 1 |"]));
    }

    #[test]
    fn test_split_blocks() {
        let doc = "para one\nstill one\n\n\n| a | b |\n|---|---|\n| 1 | 2 |\n   \nlast";
        let blocks = split_blocks(doc);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].lines, vec!["para one", "still one"]);
        assert_eq!(blocks[1].start, 4);
        assert_eq!(blocks[1].line_number(), 5);
        assert_eq!(blocks[1].end(), 7);
        assert_eq!(blocks[2].lines, vec!["last"]);
    }

    #[test]
    fn test_split_blocks_empty() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n  \n").is_empty());
    }

    #[test]
    fn test_convert_document_passes_text_through() {
        let doc = "Intro\n\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nOutro\n";
        let out = convert_document_with(doc, &SpanTableProcessor::default(), |t: &Table| {
            format!("<{} rows>", t.body.len())
        });
        assert_eq!(out.content, "Intro\n\n\n<1 rows>\n\nOutro\n");
        assert!(!out.has_warnings());
    }

    #[test]
    fn test_convert_document_without_trailing_newline() {
        let doc = "| a | b |\n|---|---|\n| 1 | 2 |";
        let out = convert_document_with(doc, &SpanTableProcessor::default(), |_: &Table| {
            "T".to_string()
        });
        assert_eq!(out.content, "T");
    }

    #[test]
    fn test_convert_document_warns_on_missing_separator() {
        let doc = "| a | b |\n| 1 | 2 |\n| 3 | 4 |\n";
        let out = convert_document(doc, &TableOptions::default());
        assert_eq!(out.content, doc);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, Some(1));
    }
}
