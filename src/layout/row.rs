//! Reconstructed table rows.

use crate::geometry::{intervals_overlap, Axis};
use crate::layout::fragment::TextFragment;
use crate::text::TextNormalization;
use indexmap::IndexMap;

/// A row mapping as handed to callers: column label to cell text.
///
/// Columns appear in header order. A column with no fragment is absent,
/// never an empty string.
pub type RowMap = IndexMap<String, String>;

/// The fragments that landed in one column of one row.
#[derive(Debug, Clone)]
pub struct Cell<'a, F> {
    column: usize,
    fragments: Vec<&'a F>,
}

impl<'a, F: TextFragment> Cell<'a, F> {
    /// Index of the column in the header layout.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The fragments in document order.
    pub fn fragments(&self) -> &[&'a F] {
        &self.fragments
    }

    /// Fragment texts concatenated as drawn, without any separator.
    pub fn raw_text(&self) -> String {
        self.fragments.iter().map(|f| f.text()).collect()
    }

    /// Cell text after normalization.
    pub fn text(&self, normalization: &TextNormalization) -> String {
        normalization.normalize_value(&self.raw_text())
    }
}

/// One reconstructed record: column label to the fragments in that column.
#[derive(Debug, Clone)]
pub struct Row<'a, F> {
    cells: IndexMap<String, Cell<'a, F>>,
}

impl<'a, F: TextFragment> Default for Row<'a, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, F: TextFragment> Row<'a, F> {
    /// An empty row.
    pub fn new() -> Self {
        Self {
            cells: IndexMap::new(),
        }
    }

    /// Place `fragment` into column `column` labelled `label`.
    ///
    /// Fragments added to the same column are kept in insertion order.
    pub fn push(&mut self, column: usize, label: &str, fragment: &'a F) {
        match self.cells.get_mut(label) {
            Some(cell) => cell.fragments.push(fragment),
            None => {
                self.cells.insert(
                    label.to_string(),
                    Cell {
                        column,
                        fragments: vec![fragment],
                    },
                );
                self.sort_columns();
            },
        }
    }

    /// Cell for `label`, if any fragment fell into that column.
    pub fn get(&self, label: &str) -> Option<&Cell<'a, F>> {
        self.cells.get(label)
    }

    /// Normalized text of the cell for `label`.
    pub fn text(&self, label: &str, normalization: &TextNormalization) -> Option<String> {
        self.get(label).map(|cell| cell.text(normalization))
    }

    /// Whether the row has a cell for `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.cells.contains_key(label)
    }

    /// Labels of the present columns, in column order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// `(label, cell)` pairs in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell<'a, F>)> {
        self.cells.iter().map(|(label, cell)| (label.as_str(), cell))
    }

    /// Number of present columns.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no column has a fragment.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every fragment of the row, column by column.
    pub fn fragments(&self) -> impl Iterator<Item = &'a F> + '_ {
        self.cells
            .values()
            .flat_map(|cell| cell.fragments.iter().copied())
    }

    /// `(min low, max high)` over the row's fragments along `axis`.
    ///
    /// `None` for an empty row.
    pub fn extent(&self, axis: Axis) -> Option<(f32, f32)> {
        self.fragments().fold(None, |acc, f| {
            let (lo, hi) = (f.low(axis), f.high(axis));
            Some(match acc {
                None => (lo, hi),
                Some((min, max)) => (lo.min(min), hi.max(max)),
            })
        })
    }

    /// Lowest `y0` of the row.
    pub fn y0(&self) -> Option<f32> {
        self.extent(Axis::Y).map(|(lo, _)| lo)
    }

    /// Highest `y1` of the row.
    pub fn y1(&self) -> Option<f32> {
        self.extent(Axis::Y).map(|(_, hi)| hi)
    }

    /// Strict overlap of the two rows' extents along `axis`.
    pub fn overlaps(&self, other: &Row<'a, F>, axis: Axis) -> bool {
        match (self.extent(axis), other.extent(axis)) {
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => intervals_overlap(a_lo, a_hi, b_lo, b_hi),
            _ => false,
        }
    }

    /// Fold a later row into this one.
    ///
    /// Per column, `later`'s fragments are appended after this row's.
    pub fn absorb(&mut self, later: Row<'a, F>) {
        for (label, cell) in later.cells {
            match self.cells.get_mut(&label) {
                Some(existing) => existing.fragments.extend(cell.fragments),
                None => {
                    self.cells.insert(label, cell);
                },
            }
        }
        self.sort_columns();
    }

    /// The row as a label-to-text mapping.
    pub fn to_map(&self, normalization: &TextNormalization) -> RowMap {
        self.cells
            .iter()
            .map(|(label, cell)| (label.clone(), cell.text(normalization)))
            .collect()
    }

    fn sort_columns(&mut self) {
        self.cells.sort_by(|_, a, _, b| a.column.cmp(&b.column));
    }
}
