//! Vertical span (rowspan) resolution
//!
//! Rowspans are written as a column of cells: a content cell, any number of
//! empty cells below it, and a marker cell (`_`) closing the run. The resolver
//! collapses such a run into its top cell.

use fxhash::FxHashMap;

use super::cell::Section;

/// Column/row addressable view over a section whose colspans are applied.
///
/// A cell is recorded once, at the leftmost grid column it occupies.
pub struct GridIndex {
    /// (column, row) -> slot of the cell inside `rows[row].cells`
    slots: FxHashMap<(usize, usize), usize>,
    /// Grid width: the widest row's total colspan
    pub columns: usize,
    pub rows: usize,
}

impl GridIndex {
    pub fn build(section: &Section) -> Self {
        let mut slots = FxHashMap::default();
        let mut columns = 0;

        for (y, row) in section.rows.iter().enumerate() {
            let mut x = 0;
            for (slot, cell) in row.cells.iter().enumerate() {
                slots.insert((x, y), slot);
                x += cell.colspan;
            }
            columns = columns.max(x);
        }

        GridIndex {
            slots,
            columns,
            rows: section.rows.len(),
        }
    }

    /// Slot of the cell whose leftmost column is `x` in row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        self.slots.get(&(x, y)).copied()
    }
}

/// Collapse marker-terminated vertical runs of `section` in place.
///
/// Cells absorbed into a rowspan are tombstoned while the columns are scanned
/// and dropped from their rows afterwards, so the slot numbers held by the
/// index stay valid for the whole scan.
pub fn resolve_rowspans(section: &mut Section) {
    let grid = GridIndex::build(section);
    let mut removed: Vec<Vec<bool>> = section
        .rows
        .iter()
        .map(|row| vec![false; row.cells.len()])
        .collect();

    for x in 0..grid.columns {
        let mut run = 0;
        let mut current_colspan: Option<usize> = None;

        for y in 0..grid.rows {
            let Some(slot) = grid.get(x, y) else {
                run = 0;
                continue;
            };

            let cell = &mut section.rows[y].cells[slot];
            if current_colspan != Some(cell.colspan) {
                current_colspan = Some(cell.colspan);
                run = 0;
            }

            if cell.is_empty() {
                run += 1;
            } else if cell.is_rowspan_marker() {
                cell.text.clear();
                run += 1;

                let first = y + 1 - run;
                for del_y in (first + 1..=y).rev() {
                    // Every row of the run has a cell at this column,
                    // otherwise the run would have been reset
                    if let Some(del_slot) = grid.get(x, del_y) {
                        removed[del_y][del_slot] = true;
                    }
                }
                if let Some(first_slot) = grid.get(x, first) {
                    section.rows[first].cells[first_slot].rowspan = run;
                }
                log::trace!("rowspan {} at column {}, rows {}..={}", run, x, first, y);
                run = 0;
            } else {
                run = 1;
            }
        }
    }

    for (row, dead) in section.rows.iter_mut().zip(removed) {
        let mut slot = 0;
        row.cells.retain(|_| {
            let keep = !dead[slot];
            slot += 1;
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::cell::{GridCell, GridRow};
    use super::*;

    fn body(rows: &[&[(&str, usize)]]) -> Section {
        let mut section = Section::body();
        for cells in rows {
            let mut row = GridRow::new();
            for (text, colspan) in cells.iter() {
                row.push(GridCell::with_spans(*text, *colspan, 1));
            }
            section.push(row);
        }
        section
    }

    fn texts(section: &Section) -> Vec<Vec<(String, usize, usize)>> {
        section
            .rows
            .iter()
            .map(|r| {
                r.cells
                    .iter()
                    .map(|c| (c.text.clone(), c.colspan, c.rowspan))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_grid_index_uses_leftmost_column() {
        let section = body(&[
            &[("A", 2), ("B", 1)],
            &[("C", 1), ("D", 1), ("E", 1)],
        ]);
        let grid = GridIndex::build(&section);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(2, 0), Some(1));
        assert_eq!(grid.get(2, 1), Some(2));
    }

    #[test]
    fn test_basic_rowspan() {
        let mut section = body(&[
            &[("X", 1), ("a", 1)],
            &[("", 1), ("b", 1)],
            &[("_", 1), ("c", 1)],
        ]);
        resolve_rowspans(&mut section);
        assert_eq!(
            texts(&section),
            vec![
                vec![("X".to_string(), 1, 3), ("a".to_string(), 1, 1)],
                vec![("b".to_string(), 1, 1)],
                vec![("c".to_string(), 1, 1)],
            ]
        );
    }

    #[test]
    fn test_marker_directly_below() {
        let mut section = body(&[&[("X", 1)], &[("__", 1)]]);
        resolve_rowspans(&mut section);
        assert_eq!(section.rows[0].cells[0].rowspan, 2);
        assert!(section.rows[1].cells.is_empty());
    }

    #[test]
    fn test_empty_run_without_marker_is_kept() {
        let mut section = body(&[&[("X", 1)], &[("", 1)], &[("", 1)]]);
        let before = section.clone();
        resolve_rowspans(&mut section);
        assert_eq!(section, before);
    }

    #[test]
    fn test_colspan_mismatch_breaks_run() {
        // Row 0 spans two columns, row 1 does not: the marker only closes
        // a run of itself
        let mut section = body(&[&[("Wide", 2)], &[("_", 1), ("z", 1)]]);
        resolve_rowspans(&mut section);
        assert_eq!(section.rows[0].cells[0].rowspan, 1);
        assert_eq!(section.rows[1].cells.len(), 2);
        assert_eq!(section.rows[1].cells[0].text, "");
        assert_eq!(section.rows[1].cells[0].rowspan, 1);
    }

    #[test]
    fn test_matching_colspans_merge() {
        let mut section = body(&[&[("Wide", 2)], &[("", 2)], &[("_", 2)]]);
        resolve_rowspans(&mut section);
        assert_eq!(section.rows[0].cells[0].rowspan, 3);
        assert!(section.rows[1].cells.is_empty());
        assert!(section.rows[2].cells.is_empty());
    }

    #[test]
    fn test_independent_columns() {
        let mut section = body(&[
            &[("A", 1), ("B", 1)],
            &[("_", 1), ("", 1)],
            &[("C", 1), ("_", 1)],
        ]);
        resolve_rowspans(&mut section);
        assert_eq!(
            texts(&section),
            vec![
                vec![("A".to_string(), 1, 2), ("B".to_string(), 1, 3)],
                vec![],
                vec![("C".to_string(), 1, 1)],
            ]
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut section = body(&[
            &[("X", 1), ("a", 1)],
            &[("", 1), ("b", 1)],
            &[("_", 1), ("c", 1)],
            &[("Y", 1), ("d", 1)],
        ]);
        resolve_rowspans(&mut section);
        let once = section.clone();
        resolve_rowspans(&mut section);
        assert_eq!(section, once);
    }
}
