//! Cell, row and section types for span tables

/// Column alignment derived from the separator row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellAlign {
    Left,
    Center,
    Right,
    /// No explicit alignment; renderers omit the attribute
    #[default]
    Auto,
}

impl CellAlign {
    /// Classify one trimmed separator cell such as `:---:`
    pub fn from_separator(cell: &str) -> Self {
        let cell = cell.trim();
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => CellAlign::Center,
            (true, false) => CellAlign::Left,
            (false, true) => CellAlign::Right,
            (false, false) => CellAlign::Auto,
        }
    }

    /// Attribute value, or `None` when no alignment should be emitted
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            CellAlign::Left => Some("left"),
            CellAlign::Center => Some("center"),
            CellAlign::Right => Some("right"),
            CellAlign::Auto => None,
        }
    }

    /// Convert to Typst alignment string
    pub fn to_typst(&self) -> &'static str {
        match self {
            CellAlign::Left => "left",
            CellAlign::Center => "center",
            CellAlign::Right => "right",
            CellAlign::Auto => "auto",
        }
    }
}

/// A single table cell with span and alignment info
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// Trimmed cell text, still carrying inline markup
    pub text: String,
    /// Number of columns this cell spans
    pub colspan: usize,
    /// Number of rows this cell spans
    pub rowspan: usize,
    pub align: CellAlign,
}

impl GridCell {
    /// Create a new cell with text
    pub fn new(text: impl Into<String>) -> Self {
        GridCell {
            text: text.into(),
            colspan: 1,
            rowspan: 1,
            align: CellAlign::Auto,
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        GridCell::new(String::new())
    }

    pub fn with_spans(text: impl Into<String>, colspan: usize, rowspan: usize) -> Self {
        GridCell {
            colspan,
            rowspan,
            ..GridCell::new(text)
        }
    }

    pub fn with_align(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the cell closes a vertical run.
    ///
    /// A marker is made only of underscores and whitespace and starts or
    /// ends with an underscore, e.g. `_`, `__` or `_ _`.
    pub fn is_rowspan_marker(&self) -> bool {
        let text = self.text.as_str();
        (text.starts_with('_') || text.ends_with('_'))
            && text.trim_matches(|c: char| c == '_' || c.is_whitespace()).is_empty()
    }

    /// Whether any span attribute must be emitted
    pub fn is_spanning(&self) -> bool {
        self.colspan > 1 || self.rowspan > 1
    }
}

/// Represents a built table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRow {
    /// Cells in this row
    pub cells: Vec<GridCell>,
}

impl GridRow {
    /// Create a new empty row
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: GridCell) {
        self.cells.push(cell);
    }

    /// Sum of colspans; rowspans from rows above are not counted
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan).sum()
    }
}

/// Which part of the table a section is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SectionKind {
    Header,
    Body,
}

/// An ordered group of rows
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub kind: SectionKind,
    pub rows: Vec<GridRow>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Section {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn header() -> Self {
        Self::new(SectionKind::Header)
    }

    pub fn body() -> Self {
        Self::new(SectionKind::Body)
    }

    pub fn push(&mut self, row: GridRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Complete table structure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// One alignment per logical column
    pub alignments: Vec<CellAlign>,
    pub header: Section,
    pub body: Section,
    /// Caption text with the caption mark removed
    pub caption: Option<String>,
    /// Whether the rows were written with border pipes
    pub border: bool,
}

impl Table {
    pub fn new(alignments: Vec<CellAlign>) -> Self {
        Table {
            alignments,
            header: Section::header(),
            body: Section::body(),
            caption: None,
            border: false,
        }
    }

    pub fn num_cols(&self) -> usize {
        self.alignments.len()
    }

    /// Iterate over header rows followed by body rows
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.header.rows.iter().chain(self.body.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_from_separator() {
        assert_eq!(CellAlign::from_separator(":---:"), CellAlign::Center);
        assert_eq!(CellAlign::from_separator(" :--- "), CellAlign::Left);
        assert_eq!(CellAlign::from_separator("---:"), CellAlign::Right);
        assert_eq!(CellAlign::from_separator("---"), CellAlign::Auto);
        assert_eq!(CellAlign::Auto.as_attr(), None);
        assert_eq!(CellAlign::Right.as_attr(), Some("right"));
    }

    #[test]
    fn test_rowspan_marker() {
        assert!(GridCell::new("_").is_rowspan_marker());
        assert!(GridCell::new("___").is_rowspan_marker());
        assert!(GridCell::new("_ _").is_rowspan_marker());
        assert!(!GridCell::new("").is_rowspan_marker());
        assert!(!GridCell::new("_a_").is_rowspan_marker());
        assert!(!GridCell::new("snake_case").is_rowspan_marker());
        assert!(!GridCell::new("__init").is_rowspan_marker());
    }

    #[test]
    fn test_row_width() {
        let mut row = GridRow::new();
        row.push(GridCell::with_spans("A", 2, 1));
        row.push(GridCell::new("B"));
        assert_eq!(row.width(), 3);
    }
}
