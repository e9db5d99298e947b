//! Locating a table header by its known column labels.
//!
//! Generated statements repeat the same header on every page, so the header
//! row is found by content: the first band of fragments (in reading order)
//! that contains every required label.

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::geometry::Axis;
use crate::layout::banding::band_along;
use crate::layout::fragment::TextFragment;
use crate::text::TextNormalization;
use regex::Regex;
use std::fmt;

/// A required header label.
#[derive(Debug, Clone)]
pub enum LabelPattern {
    /// Matches a fragment whose normalized text equals the label.
    Exact(String),
    /// Matches a fragment whose normalized text contains a regex match.
    Regex(Regex),
}

impl LabelPattern {
    /// An exact label.
    pub fn exact(label: impl Into<String>) -> Self {
        LabelPattern::Exact(label.into())
    }

    /// A regular-expression label.
    ///
    /// Use an inline `(?i)` flag for case-insensitive patterns.
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(LabelPattern::Regex)
            .map_err(|e| Error::InvalidPattern(format!("{}: {}", pattern, e)))
    }

    /// The label text, or the pattern source for regex labels.
    pub fn as_str(&self) -> &str {
        match self {
            LabelPattern::Exact(label) => label,
            LabelPattern::Regex(regex) => regex.as_str(),
        }
    }

    /// Whether `text` satisfies this label.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::layout::LabelPattern;
    /// use pdf_tabular::text::TextNormalization;
    ///
    /// let norm = TextNormalization::default().with_case_insensitive(true);
    /// assert!(LabelPattern::exact("Last Name").matches(" LAST NAME\n", &norm));
    /// assert!(LabelPattern::regex(r"^Amount").unwrap().matches("Amount ($)", &norm));
    /// ```
    pub fn matches(&self, text: &str, normalization: &TextNormalization) -> bool {
        match self {
            LabelPattern::Exact(label) => normalization.labels_equal(label, text),
            LabelPattern::Regex(regex) => regex.is_match(&normalization.normalize_value(text)),
        }
    }
}

impl From<&str> for LabelPattern {
    fn from(label: &str) -> Self {
        LabelPattern::exact(label)
    }
}

impl From<String> for LabelPattern {
    fn from(label: String) -> Self {
        LabelPattern::Exact(label)
    }
}

impl From<Regex> for LabelPattern {
    fn from(regex: Regex) -> Self {
        LabelPattern::Regex(regex)
    }
}

impl fmt::Display for LabelPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelPattern::Exact(label) => write!(f, "{:?}", label),
            LabelPattern::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// The header row found on a page.
#[derive(Debug, Clone)]
pub struct HeaderGroup<'a, F> {
    /// Coordinate of the picked header that comes last in document order
    pub baseline: f32,
    /// One fragment per label, ascending along the field axis
    pub headers: Vec<&'a F>,
}

/// Find the coordinate at which all `labels` co-occur.
///
/// `axis` is the axis records are stacked along and the one the coordinate
/// is reported on; for an ordinary table that is [`Axis::Y`] and the result
/// is the header's `y0`.
///
/// # Errors
///
/// [`Error::NoMatchFound`] when no band covers every label,
/// [`Error::Configuration`] when `labels` is empty.
pub fn find_attr_group_matching<F: TextFragment>(
    labels: &[LabelPattern],
    axis: Axis,
    fragments: &[F],
    config: &TableConfig,
) -> Result<f32> {
    find_header_group(labels, axis, fragments, config).map(|group| group.baseline)
}

/// Find the header band and pick one fragment per label from it.
///
/// Bands are built with [`TableConfig::header_tolerance`] and tested in
/// document order; the first band that covers every label wins. Within the
/// band, each label takes the first not-yet-used fragment that matches it, so
/// a single fragment never heads two columns. The picked fragments must lie
/// within `header_tolerance` of each other along `axis`: a band that only
/// chains its labels together through other text is searched window by
/// window instead.
///
/// The baseline is the picked header that comes last in document order (the
/// lowest `y0` of an ordinary header row), so any other text on the header
/// line stays out of the body.
pub fn find_header_group<'a, F: TextFragment>(
    labels: &[LabelPattern],
    axis: Axis,
    fragments: &'a [F],
    config: &TableConfig,
) -> Result<HeaderGroup<'a, F>> {
    if labels.is_empty() {
        return Err(Error::Configuration(
            "at least one header label is required".to_string(),
        ));
    }

    let normalization = &config.text_normalization;
    let tolerance = config.header_tolerance;
    let field_axis = axis.other();

    for band in band_along(fragments, axis, tolerance) {
        let members = &band.members;
        for start in 0..members.len() {
            let anchor = members[start].low(axis);
            let window: Vec<&'a F> = members[start..]
                .iter()
                .take_while(|f| (f.low(axis) - anchor).abs() <= tolerance)
                .copied()
                .collect();

            if let Some(headers) = pick_headers(labels, &window, field_axis, normalization) {
                let baseline = headers
                    .iter()
                    .map(|h| h.low(axis))
                    .reduce(|last, coord| if axis.is_past(coord, last) { coord } else { last })
                    .unwrap_or(anchor);
                log::debug!(
                    "Header found at {:?}={:.2} with {} columns",
                    axis,
                    baseline,
                    headers.len()
                );
                return Ok(HeaderGroup { baseline, headers });
            }

            // A window reaching the end of the band holds every later window
            if start + window.len() == members.len() {
                break;
            }
        }
    }

    Err(Error::NoMatchFound {
        labels: labels.iter().map(|l| l.as_str().to_string()).collect(),
    })
}

fn pick_headers<'a, F: TextFragment>(
    labels: &[LabelPattern],
    members: &[&'a F],
    field_axis: Axis,
    normalization: &TextNormalization,
) -> Option<Vec<&'a F>> {
    let mut candidates = members.to_vec();
    candidates.sort_by(|a, b| field_axis.document_order(a.low(field_axis), b.low(field_axis)));

    let mut used = vec![false; candidates.len()];
    let mut headers = Vec::with_capacity(labels.len());
    for label in labels {
        let idx = candidates
            .iter()
            .enumerate()
            .position(|(i, f)| !used[i] && label.matches(f.text(), normalization))?;
        used[idx] = true;
        headers.push(candidates[idx]);
    }

    headers.sort_by(|a, b| a.low(field_axis).total_cmp(&b.low(field_axis)));
    Some(headers)
}

/// A regex hit inside one fragment.
#[derive(Debug, Clone)]
pub struct LineMatch<'a, F> {
    /// The fragment containing the match
    pub fragment: &'a F,
    /// Byte offset of the match start in the fragment text
    pub start: usize,
    /// Byte offset of the match end in the fragment text
    pub end: usize,
}

impl<'a, F: TextFragment> LineMatch<'a, F> {
    /// The matched text.
    pub fn as_str(&self) -> &'a str {
        &self.fragment.text()[self.start..self.end]
    }
}

/// Find every fragment whose text contains a match of `pattern`.
///
/// Handy for values printed outside the table, such as a statement date or
/// an account number next to a fixed caption.
///
/// # Examples
///
/// ```
/// use pdf_tabular::geometry::BBox;
/// use pdf_tabular::layout::{find_lines_with, Fragment};
///
/// let frags = vec![
///     Fragment::new("Statement date: 2019-07-31", BBox::new(0.0, 700.0, 200.0, 710.0)),
///     Fragment::new("Page 1", BBox::new(500.0, 20.0, 540.0, 30.0)),
/// ];
/// let hits = find_lines_with(r"\d{4}-\d{2}-\d{2}", &frags).unwrap();
///
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].as_str(), "2019-07-31");
/// ```
pub fn find_lines_with<'a, F: TextFragment>(
    pattern: &str,
    fragments: &'a [F],
) -> Result<Vec<LineMatch<'a, F>>> {
    let regex =
        Regex::new(pattern).map_err(|e| Error::InvalidPattern(format!("{}: {}", pattern, e)))?;
    Ok(find_lines_matching(&regex, fragments))
}

/// Like [`find_lines_with`] with a precompiled regex.
pub fn find_lines_matching<'a, F: TextFragment>(
    regex: &Regex,
    fragments: &'a [F],
) -> Vec<LineMatch<'a, F>> {
    fragments
        .iter()
        .filter_map(|fragment| {
            regex.find(fragment.text()).map(|m| LineMatch {
                fragment,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}
