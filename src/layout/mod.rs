//! Geometric table reconstruction.
//!
//! The pieces, in the order a page flows through them:
//! - [`fragment`]: positioned text spans handed over by a layout provider
//! - [`banding`]: tolerance-banded clustering along one axis
//! - [`header_matcher`]: locating the header row by its labels
//! - [`row_partitioner`]: assigning body fragments to rows and columns
//! - [`row_merger`]: fusing rows split across drawing passes

pub mod banding;
pub mod fragment;
pub mod header_matcher;
pub mod row;
pub mod row_merger;
pub mod row_partitioner;

// Re-export main types
pub use fragment::{same_fragment, Fragment, TextFragment};
pub use header_matcher::{
    find_attr_group_matching, find_header_group, find_lines_matching, find_lines_with,
    HeaderGroup, LabelPattern, LineMatch,
};
pub use row::{Cell, Row, RowMap};
pub use row_merger::merge_overlapping_rows;
pub use row_partitioner::{
    find_col_table, find_row_table, find_table, ColumnLayout, Orientation, RowTable,
};
