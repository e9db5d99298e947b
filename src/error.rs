//! Error types for table reconstruction.
//!
//! Hard failures are [`Error`] values. Recoverable conditions that only cost a
//! single fragment are reported as [`Diagnostic`]s next to the rows instead.

use crate::geometry::BBox;
use std::fmt;

/// Result type alias for table reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No band of fragments covers every required header label.
    ///
    /// Page-level condition: the caller decides whether to skip the page or abort.
    #[error("No fragment group matches header labels {labels:?}")]
    NoMatchFound {
        /// The labels that were searched for
        labels: Vec<String>,
    },

    /// Malformed header layout or configuration (overlapping column spans,
    /// duplicate labels, bad tolerances). Fatal for the page.
    #[error("Invalid table configuration: {0}")]
    Configuration(String),

    /// A label pattern failed to compile
    #[error("Invalid label pattern: {0}")]
    InvalidPattern(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed fragment dump
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A recoverable problem found while building rows.
///
/// Diagnostics never stop row construction. They carry enough geometry to let
/// a human see which part of the PDF layout did not line up with the header.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A body fragment fell outside every column span and was dropped.
    UnassignedFragment {
        /// Text of the dropped fragment
        text: String,
        /// Where the fragment sits on the page
        bbox: BBox,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnassignedFragment { text, bbox } => write!(
                f,
                "unassigned fragment {:?} at x0={} x1={} y0={} y1={}",
                text, bbox.x0, bbox.x1, bbox.y0, bbox.y1
            ),
        }
    }
}
