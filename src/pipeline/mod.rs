//! Page pipeline for table reconstruction.
//!
//! ```text
//! Layout provider (pages of positioned text)
//!     ↓
//! [find_header_group] (header baseline + column headers)
//!     ↓
//! [find_table] (body fragments → rows)
//!     ↓
//! [merge_overlapping_rows] (split rows → logical rows)
//!     ↓
//! PageRows (label → text mappings + diagnostics)
//! ```
//!
//! Pages are independent: nothing is carried from one page to the next, so
//! callers may hand pages to separate threads with their own extractor clone.

pub mod extractor;
pub mod source;

// Re-export main types
pub use extractor::{PageRows, PageTable, Pages, TableExtractor};
pub use source::FragmentDump;
