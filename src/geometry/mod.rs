//! Geometric primitives for table reconstruction.
//!
//! Coordinates follow the PDF page convention: origin at the bottom-left,
//! `x` growing to the right and `y` growing upward. A fragment higher on the
//! page therefore has a *larger* `y0`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its lower-left and upper-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::geometry::BBox;
    ///
    /// let bbox = BBox::new(10.0, 20.0, 110.0, 32.0);
    /// assert_eq!(bbox.width(), 100.0);
    /// assert_eq!(bbox.height(), 12.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box containing both boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::geometry::BBox;
    ///
    /// let a = BBox::new(0.0, 88.0, 40.0, 91.0);
    /// let b = BBox::new(50.0, 89.0, 90.0, 92.0);
    /// let u = a.union(&b);
    ///
    /// assert_eq!(u, BBox::new(0.0, 88.0, 90.0, 92.0));
    /// ```
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Lower bound of the box along `axis`.
    pub fn low(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x0,
            Axis::Y => self.y0,
        }
    }

    /// Upper bound of the box along `axis`.
    pub fn high(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x1,
            Axis::Y => self.y1,
        }
    }
}

/// One of the two page axes.
///
/// Table reconstruction works along two axes at once: records are stacked
/// along one of them and fields are laid out along the other. A normal
/// row table stacks records along [`Axis::Y`] and fields along [`Axis::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis (`x0`/`x1`)
    X,
    /// Vertical axis (`y0`/`y1`)
    Y,
}

impl Axis {
    /// The perpendicular axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Compare two coordinates in the order a reader meets them.
    ///
    /// Top of the page first on [`Axis::Y`] (descending `y`), left first on
    /// [`Axis::X`] (ascending `x`).
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::geometry::Axis;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Axis::Y.document_order(100.0, 90.0), Ordering::Less);
    /// assert_eq!(Axis::X.document_order(100.0, 90.0), Ordering::Greater);
    /// ```
    pub fn document_order(self, a: f32, b: f32) -> Ordering {
        match self {
            Axis::X => a.total_cmp(&b),
            Axis::Y => b.total_cmp(&a),
        }
    }

    /// Whether `coord` lies strictly after `baseline` in document order.
    pub fn is_past(self, coord: f32, baseline: f32) -> bool {
        match self {
            Axis::X => coord > baseline,
            Axis::Y => coord < baseline,
        }
    }
}

/// Length of the intersection of `[a_min, a_max]` and `[b_min, b_max]`.
///
/// Zero when the intervals are disjoint or only touch.
///
/// # Examples
///
/// ```
/// use pdf_tabular::geometry::overlap;
///
/// assert_eq!(overlap(88.0, 91.0, 89.0, 92.0), 2.0);
/// assert_eq!(overlap(0.0, 10.0, 10.0, 20.0), 0.0);
/// ```
pub fn overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    let begin = a_min.max(b_min);
    let end = a_max.min(b_max);
    (end - begin).max(0.0)
}

/// Strict interval overlap: `a_max > b_min && b_max > a_min`.
///
/// Mere adjacency (`a_max == b_min`) is not an overlap.
pub fn intervals_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max > b_min && b_max > a_min
}
