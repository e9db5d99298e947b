//! Repairing rows split across drawing passes.
//!
//! Generators often draw one logical line in several runs whose baselines
//! differ by a fraction of a point, so the partitioner sees two rows whose
//! extents overlap. This pass folds such rows back together.

use crate::geometry::Axis;
use crate::layout::fragment::TextFragment;
use crate::layout::row::Row;

/// Merge adjacent rows whose extents along `axis` strictly overlap.
///
/// A single sweep in document order: the row being built is compared with
/// the next input row, absorbs it on overlap (earlier fragments first, per
/// column) and is emitted otherwise. Fusion only chains through consecutive
/// overlapping pairs; rows that only touch are left alone.
///
/// The result holds no more rows than the input, keeps the input order, and
/// contains every input fragment exactly once.
///
/// `axis` selects the extents compared: [`Axis::Y`] (`y0`/`y1`) for ordinary
/// tables, [`Axis::X`] (`x0`/`x1`) for transposed ones.
pub fn merge_overlapping_rows<'a, F: TextFragment>(
    rows: Vec<Row<'a, F>>,
    axis: Axis,
) -> Vec<Row<'a, F>> {
    let input_len = rows.len();
    let mut merged: Vec<Row<'a, F>> = Vec::with_capacity(input_len);

    let mut rows = rows.into_iter();
    let mut current = match rows.next() {
        Some(row) => row,
        None => return merged,
    };

    for next in rows {
        if current.overlaps(&next, axis) {
            current.absorb(next);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);

    if merged.len() < input_len {
        log::debug!("Merged {} rows into {}", input_len, merged.len());
    }

    merged
}
