//! Text normalization applied to header labels and cell values.

mod normalize;

pub use normalize::TextNormalization;
