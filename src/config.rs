//! Configuration for table reconstruction.

use crate::error::{Error, Result};
use crate::text::TextNormalization;
use serde::{Deserialize, Serialize};

/// Default band width for grouping body fragments into rows.
pub const DEFAULT_VERTICAL_TOLERANCE: f32 = 0.5;

/// Default band width for grouping header labels.
pub const DEFAULT_HEADER_TOLERANCE: f32 = 5.0;

/// Table reconstruction configuration.
///
/// Every tolerance is in page units (PDF points). Floating coordinates are
/// never compared for exact equality; these bands are what "same line" means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Body fragments whose record coordinate lies within this distance of a
    /// row band's running centroid join that row.
    pub vertical_tolerance: f32,

    /// Header label fragments within this distance of each other count as
    /// one header group.
    pub header_tolerance: f32,

    /// Whitespace and case rules for labels and values.
    pub text_normalization: TextNormalization,

    /// Far edge of the last column. `None` extends it to infinity.
    pub right_boundary: Option<f32>,

    /// Run the overlap merge after partitioning.
    pub merge_overlapping_rows: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            vertical_tolerance: DEFAULT_VERTICAL_TOLERANCE,
            header_tolerance: DEFAULT_HEADER_TOLERANCE,
            text_normalization: TextNormalization::default(),
            right_boundary: None,
            merge_overlapping_rows: true,
        }
    }

    /// Set the row grouping tolerance.
    pub fn with_vertical_tolerance(mut self, tolerance: f32) -> Self {
        self.vertical_tolerance = tolerance;
        self
    }

    /// Set the header grouping tolerance.
    pub fn with_header_tolerance(mut self, tolerance: f32) -> Self {
        self.header_tolerance = tolerance;
        self
    }

    /// Set text normalization rules.
    pub fn with_text_normalization(mut self, normalization: TextNormalization) -> Self {
        self.text_normalization = normalization;
        self
    }

    /// Bound the last column.
    pub fn with_right_boundary(mut self, boundary: f32) -> Self {
        self.right_boundary = Some(boundary);
        self
    }

    /// Enable or disable the overlap merge.
    pub fn with_merge_overlapping_rows(mut self, enable: bool) -> Self {
        self.merge_overlapping_rows = enable;
        self
    }

    /// Check that tolerances and boundaries are usable.
    pub fn validate(&self) -> Result<()> {
        check_tolerance("vertical_tolerance", self.vertical_tolerance)?;
        check_tolerance("header_tolerance", self.header_tolerance)?;
        if let Some(boundary) = self.right_boundary {
            if !boundary.is_finite() {
                return Err(Error::Configuration(format!(
                    "right_boundary must be finite, got {}",
                    boundary
                )));
            }
        }
        Ok(())
    }
}

fn check_tolerance(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )))
    }
}
