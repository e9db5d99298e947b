//! Partitioning body fragments into rows and columns.
//!
//! The header fragments define the columns: sorted along the field axis, the
//! column headed by `header[i]` spans `[header[i].x0, header[i+1].x0)` and the
//! last column runs to the configured right boundary (or infinity). A body
//! fragment belongs to the column whose span contains its left edge.
//!
//! Rows are tolerance bands along the record axis, taken in reading order.

use crate::config::TableConfig;
use crate::error::{Diagnostic, Error, Result};
use crate::geometry::Axis;
use crate::layout::banding::band_along;
use crate::layout::fragment::TextFragment;
use crate::layout::row::Row;
use serde::{Deserialize, Serialize};

/// How records are laid out on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Header across the top, one record per line (the usual statement layout).
    #[default]
    Rows,
    /// Header down the left side, one record per column of text.
    Columns,
}

impl Orientation {
    /// The axis records are stacked along.
    pub fn record_axis(self) -> Axis {
        match self {
            Orientation::Rows => Axis::Y,
            Orientation::Columns => Axis::X,
        }
    }

    /// The axis fields are laid out along.
    pub fn field_axis(self) -> Axis {
        self.record_axis().other()
    }
}

/// Column spans derived from the header fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    labels: Vec<String>,
    starts: Vec<f32>,
    end: Option<f32>,
}

impl ColumnLayout {
    /// Build spans from header fragments given in ascending order along
    /// `field_axis`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when there are no headers, a header does not
    /// start strictly after its predecessor, two headers share a label, or the
    /// right boundary does not lie past the last header's start.
    pub fn from_headers<F: TextFragment>(
        headers: &[&F],
        field_axis: Axis,
        config: &TableConfig,
    ) -> Result<Self> {
        if headers.is_empty() {
            return Err(Error::Configuration("no header fragments given".to_string()));
        }

        let normalization = &config.text_normalization;
        let mut labels: Vec<String> = Vec::with_capacity(headers.len());
        let mut starts: Vec<f32> = Vec::with_capacity(headers.len());

        for header in headers {
            let label = normalization.normalize_value(header.text());
            let start = header.low(field_axis);

            if !start.is_finite() {
                return Err(Error::Configuration(format!(
                    "header {:?} has a non-finite position {}",
                    label, start
                )));
            }
            if let (Some(prev_label), Some(&prev_start)) = (labels.last(), starts.last()) {
                if start <= prev_start {
                    return Err(Error::Configuration(format!(
                        "column spans overlap: header {:?} at {} does not start after {:?} at {}",
                        label, start, prev_label, prev_start
                    )));
                }
            }
            if labels.iter().any(|l| normalization.labels_equal(l, &label)) {
                return Err(Error::Configuration(format!(
                    "duplicate header label {:?} at {}",
                    label, start
                )));
            }

            labels.push(label);
            starts.push(start);
        }

        if let (Some(end), Some(&last_start)) = (config.right_boundary, starts.last()) {
            if end <= last_start {
                return Err(Error::Configuration(format!(
                    "right boundary {} does not lie past the last header start {}",
                    end, last_start
                )));
            }
        }

        Ok(Self {
            labels,
            starts,
            end: config.right_boundary,
        })
    }

    /// Column labels in span order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Half-open span `[start, end)` of column `index`.
    pub fn span(&self, index: usize) -> Option<(f32, f32)> {
        let start = *self.starts.get(index)?;
        let end = self
            .starts
            .get(index + 1)
            .copied()
            .or(self.end)
            .unwrap_or(f32::INFINITY);
        Some((start, end))
    }

    /// Index of the column whose span contains `coord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::config::TableConfig;
    /// use pdf_tabular::geometry::{Axis, BBox};
    /// use pdf_tabular::layout::{ColumnLayout, Fragment};
    ///
    /// let a = Fragment::new("Last Name", BBox::new(0.0, 100.0, 40.0, 110.0));
    /// let b = Fragment::new("First Name", BBox::new(50.0, 100.0, 90.0, 110.0));
    /// let config = TableConfig::default().with_right_boundary(150.0);
    /// let layout = ColumnLayout::from_headers(&[&a, &b], Axis::X, &config).unwrap();
    ///
    /// assert_eq!(layout.column_for(0.0), Some(0));
    /// assert_eq!(layout.column_for(49.9), Some(0));
    /// assert_eq!(layout.column_for(50.0), Some(1));
    /// assert_eq!(layout.column_for(150.0), None);
    /// assert_eq!(layout.column_for(-1.0), None);
    /// ```
    pub fn column_for(&self, coord: f32) -> Option<usize> {
        if coord.is_nan() {
            return None;
        }
        if let Some(end) = self.end {
            if coord >= end {
                return None;
            }
        }
        self.starts
            .partition_point(|&start| start <= coord)
            .checked_sub(1)
    }
}

/// Rows built from one page's body, plus what had to be dropped.
#[derive(Debug, Clone)]
pub struct RowTable<'a, F> {
    /// The column layout the rows were assigned against
    pub columns: ColumnLayout,
    /// Rows in document order
    pub rows: Vec<Row<'a, F>>,
    /// Fragments that fit no column
    pub diagnostics: Vec<Diagnostic>,
}

/// Partition `body` into rows under `headers`, records stacked along
/// `orientation`'s record axis.
///
/// `headers` must be in ascending order along the field axis. Within a row,
/// fragments are visited in reading order; fragments sharing a column are
/// concatenated in that order. A fragment outside every column span is
/// dropped and reported as [`Diagnostic::UnassignedFragment`]. A band that
/// loses all its fragments that way produces no row.
pub fn find_table<'a, F: TextFragment>(
    headers: &[&'a F],
    body: &[&'a F],
    orientation: Orientation,
    config: &TableConfig,
) -> Result<RowTable<'a, F>> {
    config.validate()?;

    let record_axis = orientation.record_axis();
    let field_axis = orientation.field_axis();
    let columns = ColumnLayout::from_headers(headers, field_axis, config)?;

    let mut rows = Vec::new();
    let mut diagnostics = Vec::new();

    for band in band_along(body.iter().copied(), record_axis, config.vertical_tolerance) {
        let mut members = band.members;
        members.sort_by(|a, b| field_axis.document_order(a.low(field_axis), b.low(field_axis)));

        let mut row = Row::new();
        for fragment in members {
            match columns.column_for(fragment.low(field_axis)) {
                Some(index) => row.push(index, &columns.labels[index], fragment),
                None => {
                    let diagnostic = Diagnostic::UnassignedFragment {
                        text: fragment.text().to_string(),
                        bbox: fragment.bbox(),
                    };
                    log::warn!("Dropping {}", diagnostic);
                    diagnostics.push(diagnostic);
                },
            }
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    log::debug!(
        "Partitioned {} fragments into {} rows over {} columns ({} unassigned)",
        body.len(),
        rows.len(),
        columns.len(),
        diagnostics.len()
    );

    Ok(RowTable {
        columns,
        rows,
        diagnostics,
    })
}

/// [`find_table`] for the usual layout: header across the top, records
/// top to bottom, columns by `x0`.
pub fn find_row_table<'a, F: TextFragment>(
    headers: &[&'a F],
    body: &[&'a F],
    config: &TableConfig,
) -> Result<RowTable<'a, F>> {
    find_table(headers, body, Orientation::Rows, config)
}

/// [`find_table`] for transposed layouts: header down the left side, records
/// left to right, fields by `y0`.
pub fn find_col_table<'a, F: TextFragment>(
    headers: &[&'a F],
    body: &[&'a F],
    config: &TableConfig,
) -> Result<RowTable<'a, F>> {
    find_table(headers, body, Orientation::Columns, config)
}
