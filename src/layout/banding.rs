//! Tolerance-banded clustering of fragments along one axis.
//!
//! Fragments are visited in document order along the axis. A fragment joins
//! the current band when its lower coordinate is within `tolerance` of the
//! band's running centroid, otherwise it opens a new band. Sorting is stable,
//! so fragments at the same coordinate keep the provider's order.

use crate::geometry::Axis;
use crate::layout::fragment::TextFragment;

/// A group of fragments sharing one tolerance band.
#[derive(Debug, Clone)]
pub struct Band<'a, F> {
    /// Mean lower coordinate of the members
    pub centroid: f32,
    /// Members in document order along the banding axis
    pub members: Vec<&'a F>,
    sum: f32,
}

impl<'a, F: TextFragment> Band<'a, F> {
    fn start(fragment: &'a F, coord: f32) -> Self {
        Self {
            centroid: coord,
            members: vec![fragment],
            sum: coord,
        }
    }

    fn push(&mut self, fragment: &'a F, coord: f32) {
        self.members.push(fragment);
        self.sum += coord;
        self.centroid = self.sum / self.members.len() as f32;
    }

    /// Number of fragments in the band.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the band has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Split fragments into bands along `axis`.
///
/// Bands come back in document order: top of the page first on
/// [`Axis::Y`], leftmost first on [`Axis::X`].
///
/// # Examples
///
/// ```
/// use pdf_tabular::geometry::{Axis, BBox};
/// use pdf_tabular::layout::{banding::band_along, Fragment};
///
/// let frags = vec![
///     Fragment::new("b", BBox::new(0.0, 80.0, 10.0, 88.0)),
///     Fragment::new("a", BBox::new(0.0, 90.0, 10.0, 98.0)),
///     Fragment::new("a'", BBox::new(20.0, 90.2, 30.0, 98.0)),
/// ];
/// let bands = band_along(&frags, Axis::Y, 0.5);
///
/// assert_eq!(bands.len(), 2);
/// assert_eq!(bands[0].members.len(), 2);
/// assert_eq!(bands[1].members[0].text, "b");
/// ```
pub fn band_along<'a, F, I>(fragments: I, axis: Axis, tolerance: f32) -> Vec<Band<'a, F>>
where
    F: TextFragment + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut sorted: Vec<&'a F> = fragments.into_iter().collect();
    sorted.sort_by(|a, b| axis.document_order(a.low(axis), b.low(axis)));

    let mut bands: Vec<Band<'a, F>> = Vec::new();
    for fragment in sorted {
        let coord = fragment.low(axis);
        match bands.last_mut() {
            Some(band) if (coord - band.centroid).abs() <= tolerance => band.push(fragment, coord),
            _ => bands.push(Band::start(fragment, coord)),
        }
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::layout::fragment::Fragment;

    fn frag(text: &str, x0: f32, y0: f32) -> Fragment {
        Fragment::new(text, BBox::new(x0, y0, x0 + 20.0, y0 + 8.0))
    }

    #[test]
    fn test_empty_input() {
        let frags: Vec<Fragment> = vec![];
        assert!(band_along(&frags, Axis::Y, 1.0).is_empty());
    }

    #[test]
    fn test_bands_are_top_down() {
        let frags = vec![frag("low", 0.0, 10.0), frag("high", 0.0, 90.0), frag("mid", 0.0, 50.0)];
        let bands = band_along(&frags, Axis::Y, 1.0);

        let texts: Vec<&str> = bands.iter().map(|b| b.members[0].text.as_str()).collect();
        assert_eq!(texts, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_bands_are_left_to_right_on_x() {
        let frags = vec![frag("c", 80.0, 0.0), frag("a", 0.0, 0.0), frag("b", 40.0, 0.0)];
        let bands = band_along(&frags, Axis::X, 1.0);

        let texts: Vec<&str> = bands.iter().map(|b| b.members[0].text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_running_centroid() {
        // 100.0 -> 99.6 joins (centroid 99.8), 99.4 joins (|99.4 - 99.8| <= 0.5)
        let frags = vec![frag("a", 0.0, 100.0), frag("b", 10.0, 99.6), frag("c", 20.0, 99.4)];
        let bands = band_along(&frags, Axis::Y, 0.5);

        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].len(), 3);
        assert!((bands[0].centroid - 99.666_67).abs() < 1e-3);
    }

    #[test]
    fn test_chain_breaks_outside_tolerance() {
        let frags = vec![frag("a", 0.0, 100.0), frag("b", 0.0, 98.0)];
        let bands = band_along(&frags, Axis::Y, 0.5);
        assert_eq!(bands.len(), 2);
    }

    #[test]
    fn test_stable_for_equal_coordinates() {
        let frags = vec![frag("first", 50.0, 90.0), frag("second", 0.0, 90.0)];
        let bands = band_along(&frags, Axis::Y, 0.0);

        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].members[0].text, "first");
        assert_eq!(bands[0].members[1].text, "second");
    }
}
