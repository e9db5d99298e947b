//! Positioned text fragments, the unit of input for table reconstruction.
//!
//! Any layout provider can feed the reconstruction by implementing
//! [`TextFragment`] for its own span type; [`Fragment`] is a plain owned
//! implementation used by the JSON dump source and by tests.

use crate::geometry::{Axis, BBox};
use serde::{Deserialize, Serialize};

/// Read-only access to a positioned piece of text.
///
/// The reconstruction only ever reads these five values, and tracks
/// fragments by reference. Two fragments with the same text and the same
/// box are still two different cells.
pub trait TextFragment {
    /// The literal text drawn inside the box.
    fn text(&self) -> &str;

    /// Left edge.
    fn x0(&self) -> f32;

    /// Right edge.
    fn x1(&self) -> f32;

    /// Bottom edge.
    fn y0(&self) -> f32;

    /// Top edge.
    fn y1(&self) -> f32;

    /// The fragment's bounding box.
    fn bbox(&self) -> BBox {
        BBox::new(self.x0(), self.y0(), self.x1(), self.y1())
    }

    /// Lower bound along `axis` (`x0` or `y0`).
    fn low(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x0(),
            Axis::Y => self.y0(),
        }
    }

    /// Upper bound along `axis` (`x1` or `y1`).
    fn high(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x1(),
            Axis::Y => self.y1(),
        }
    }
}

impl<T: TextFragment + ?Sized> TextFragment for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn x0(&self) -> f32 {
        (**self).x0()
    }

    fn x1(&self) -> f32 {
        (**self).x1()
    }

    fn y0(&self) -> f32 {
        (**self).y0()
    }

    fn y1(&self) -> f32 {
        (**self).y1()
    }
}

/// An owned text fragment.
///
/// Serializes flat, as `{"text": ..., "x0": ..., "y0": ..., "x1": ..., "y1": ...}`.
///
/// Fragments are identified by reference, never by content, so there is
/// no `PartialEq`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content
    pub text: String,
    /// Position on the page
    #[serde(flatten)]
    pub bbox: BBox,
}

impl Fragment {
    /// Create a fragment from text and a box.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_tabular::geometry::BBox;
    /// use pdf_tabular::layout::{Fragment, TextFragment};
    ///
    /// let frag = Fragment::new("Smith", BBox::new(0.0, 90.0, 30.0, 100.0));
    /// assert_eq!(frag.text(), "Smith");
    /// assert_eq!(frag.y0(), 90.0);
    /// ```
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

impl TextFragment for Fragment {
    fn text(&self) -> &str {
        &self.text
    }

    fn x0(&self) -> f32 {
        self.bbox.x0
    }

    fn x1(&self) -> f32 {
        self.bbox.x1
    }

    fn y0(&self) -> f32 {
        self.bbox.y0
    }

    fn y1(&self) -> f32 {
        self.bbox.y1
    }

    fn bbox(&self) -> BBox {
        self.bbox
    }
}

/// Whether `a` and `b` are the very same fragment.
pub fn same_fragment<F: ?Sized>(a: &F, b: &F) -> bool {
    std::ptr::eq(a, b)
}
