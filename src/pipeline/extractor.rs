//! Page-level driver: header → rows → merged rows.

use crate::config::TableConfig;
use crate::error::{Diagnostic, Result};
use crate::layout::{
    find_header_group, find_table, merge_overlapping_rows, same_fragment, LabelPattern,
    Orientation, Row, RowMap, TextFragment,
};
use serde::Serialize;

/// Reconstructs one table per page from a fixed set of header labels.
///
/// # Examples
///
/// ```
/// use pdf_tabular::geometry::BBox;
/// use pdf_tabular::layout::Fragment;
/// use pdf_tabular::pipeline::TableExtractor;
///
/// let page = vec![
///     Fragment::new("Last Name", BBox::new(0.0, 100.0, 40.0, 110.0)),
///     Fragment::new("First Name", BBox::new(50.0, 100.0, 90.0, 110.0)),
///     Fragment::new("Smith", BBox::new(0.0, 90.0, 25.0, 98.0)),
///     Fragment::new("John", BBox::new(50.0, 90.0, 70.0, 98.0)),
/// ];
///
/// let extractor = TableExtractor::new(["Last Name", "First Name"]);
/// let rows = extractor.extract_rows(&page).unwrap();
///
/// assert_eq!(rows.rows.len(), 1);
/// assert_eq!(rows.rows[0]["Last Name"], "Smith");
/// assert_eq!(rows.rows[0]["First Name"], "John");
/// ```
#[derive(Debug, Clone)]
pub struct TableExtractor {
    labels: Vec<LabelPattern>,
    orientation: Orientation,
    config: TableConfig,
}

impl TableExtractor {
    /// Extractor for the given header labels with default configuration.
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LabelPattern>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            orientation: Orientation::default(),
            config: TableConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the table orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The header labels.
    pub fn labels(&self) -> &[LabelPattern] {
        &self.labels
    }

    /// The active configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The table orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Reconstruct the table on one page, keeping fragment references.
    ///
    /// Body fragments are those strictly past the header baseline in reading
    /// order (below it for row tables), header fragments excluded.
    ///
    /// # Errors
    ///
    /// `NoMatchFound` when the header is not on the page; `Configuration`
    /// when the configuration or the detected header layout is unusable.
    pub fn extract_table<'a, F: TextFragment>(&self, fragments: &'a [F]) -> Result<PageTable<'a, F>> {
        self.config.validate()?;

        let record_axis = self.orientation.record_axis();
        let group = find_header_group(&self.labels, record_axis, fragments, &self.config)?;

        let body: Vec<&'a F> = fragments
            .iter()
            .filter(|f| record_axis.is_past(f.low(record_axis), group.baseline))
            .filter(|f| !group.headers.iter().any(|h| same_fragment(*h, *f)))
            .collect();

        let table = find_table(&group.headers, &body, self.orientation, &self.config)?;
        let partitioned = table.rows.len();
        let rows = if self.config.merge_overlapping_rows {
            merge_overlapping_rows(table.rows, record_axis)
        } else {
            table.rows
        };

        log::debug!(
            "Table at {:?}={:.2}: {} body fragments, {} rows ({} before merge)",
            record_axis,
            group.baseline,
            body.len(),
            rows.len(),
            partitioned
        );

        Ok(PageTable {
            baseline: group.baseline,
            headers: group.headers,
            labels: table.columns.labels().to_vec(),
            rows,
            diagnostics: table.diagnostics,
        })
    }

    /// Reconstruct the table on one page as owned row mappings.
    pub fn extract_rows<F: TextFragment>(&self, fragments: &[F]) -> Result<PageRows> {
        self.extract_rows_at(0, fragments)
    }

    pub(crate) fn extract_rows_at<F: TextFragment>(
        &self,
        page_index: usize,
        fragments: &[F],
    ) -> Result<PageRows> {
        let table = self.extract_table(fragments)?;
        let rows = table.row_maps(&self.config);
        log::info!(
            "Page {}: {} rows, {} diagnostics",
            page_index + 1,
            rows.len(),
            table.diagnostics.len()
        );
        Ok(PageRows {
            page_index,
            labels: table.labels,
            rows,
            diagnostics: table.diagnostics,
        })
    }

    /// Lazily reconstruct one table per page.
    ///
    /// Each item is the outcome for one page. A page without the header
    /// yields `Err(NoMatchFound)` and the iterator moves on, so the caller
    /// decides whether to skip the page (`filter_map(Result::ok)`) or abort
    /// (`collect::<Result<Vec<_>>>()`).
    pub fn extract_pages<I>(&self, pages: I) -> Pages<'_, I::IntoIter>
    where
        I: IntoIterator,
    {
        Pages {
            extractor: self,
            pages: pages.into_iter(),
            page_index: 0,
        }
    }
}

/// A reconstructed table still borrowing the page's fragments.
#[derive(Debug, Clone)]
pub struct PageTable<'a, F> {
    /// Header baseline on the record axis
    pub baseline: f32,
    /// The header fragments, one per column
    pub headers: Vec<&'a F>,
    /// Column labels in column order
    pub labels: Vec<String>,
    /// Rows in document order
    pub rows: Vec<Row<'a, F>>,
    /// Fragments that could not be placed
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a, F: TextFragment> PageTable<'a, F> {
    /// Rows as label-to-text mappings.
    pub fn row_maps(&self, config: &TableConfig) -> Vec<RowMap> {
        self.rows
            .iter()
            .map(|row| row.to_map(&config.text_normalization))
            .collect()
    }
}

/// The owned result for one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRows {
    /// Zero-based page index within the source
    pub page_index: usize,
    /// Column labels in column order
    pub labels: Vec<String>,
    /// Row mappings in document order
    pub rows: Vec<RowMap>,
    /// Fragments that could not be placed
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl IntoIterator for PageRows {
    type Item = RowMap;
    type IntoIter = std::vec::IntoIter<RowMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Lazy per-page iterator returned by [`TableExtractor::extract_pages`].
///
/// One pass only: pages are pulled from the source as the iterator is
/// advanced and are dropped once their rows are built.
#[derive(Debug)]
pub struct Pages<'e, I> {
    extractor: &'e TableExtractor,
    pages: I,
    page_index: usize,
}

impl<'e, I> Pages<'e, I> {
    /// Index of the page the next call to `next` will process.
    pub fn next_page_index(&self) -> usize {
        self.page_index
    }
}

impl<'e, I, P, F> Iterator for Pages<'e, I>
where
    I: Iterator<Item = P>,
    P: IntoIterator<Item = F>,
    F: TextFragment,
{
    type Item = Result<PageRows>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.pages.next()?;
        let fragments: Vec<F> = page.into_iter().collect();
        let page_index = self.page_index;
        self.page_index += 1;

        let outcome = self.extractor.extract_rows_at(page_index, &fragments);
        if let Err(ref e) = outcome {
            log::warn!("Page {}: {}", page_index + 1, e);
        }
        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}
