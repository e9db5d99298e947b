// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::doc_overindented_list_items)]

//! # PDF Tabular
//!
//! Reconstructs tabular records from machine-generated PDFs whose pages are a
//! flat stream of positioned text (bank and card statements, payroll and
//! grade reports). There is no table structure in such files, only text
//! drawn at coordinates; this crate rebuilds the table from the geometry.
//!
//! ## How it works
//!
//! - **Header**: the first band of fragments containing every required
//!   column label marks the header row and its baseline.
//! - **Columns**: header `i` owns `[header[i].x0, header[i+1].x0)`; the last
//!   column runs to a configurable right boundary.
//! - **Rows**: fragments below the header are grouped into tolerance bands
//!   top to bottom, each fragment placed by its left edge.
//! - **Repair**: adjacent rows with overlapping vertical extents (one line
//!   drawn in several passes) are merged back into one.
//!
//! PDF decoding is out of scope: any layout provider that can report
//! `text, x0, x1, y0, y1` per span implements [`layout::TextFragment`] and
//! plugs in directly.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_tabular::geometry::BBox;
//! use pdf_tabular::layout::Fragment;
//! use pdf_tabular::pipeline::TableExtractor;
//! use pdf_tabular::TableConfig;
//!
//! # fn main() -> pdf_tabular::Result<()> {
//! let page = vec![
//!     Fragment::new("Last Name", BBox::new(0.0, 100.0, 40.0, 110.0)),
//!     Fragment::new("First Name", BBox::new(50.0, 100.0, 90.0, 110.0)),
//!     Fragment::new("Smith", BBox::new(0.0, 90.0, 25.0, 98.0)),
//!     Fragment::new("John", BBox::new(50.0, 90.0, 70.0, 98.0)),
//! ];
//!
//! let extractor = TableExtractor::new(["Last Name", "First Name"])
//!     .with_config(TableConfig::default().with_right_boundary(500.0));
//!
//! for row in extractor.extract_rows(&page)? {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and layout analysis
pub mod geometry;
pub mod layout;

// Text normalization
pub mod text;

// Page pipeline
pub mod pipeline;

// Record shaping for persistence
pub mod record;

// Configuration
pub mod config;

pub use config::TableConfig;
pub use error::{Diagnostic, Error, Result};
pub use pipeline::{FragmentDump, PageRows, TableExtractor};
