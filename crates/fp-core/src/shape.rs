//! Footprint outlines for each shape variant.
//!
//! Outlines are in element-local coordinates: origin at the top-left of
//! the element's box, x to the right, y down, vertices in clockwise screen
//! order (counter-clockwise in math orientation).

use crate::model::ShapeVariant;
use smallvec::{SmallVec, smallvec};

/// Polygon vertices. The largest variant (T) has 8.
pub type Outline = SmallVec<[(f32, f32); 8]>;

/// Build the local outline of a `width` × `height` footprint.
///
/// - Rectangle: the full box.
/// - L-shape: the box with its top-right quarter removed.
/// - T-shape: a full-width bar across the top half and a centred stem of
///   half the width below it.
pub fn footprint(variant: ShapeVariant, width: f32, height: f32) -> Outline {
    let (w, h) = (width, height);
    match variant {
        ShapeVariant::Rectangle => smallvec![(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)],
        ShapeVariant::LShape => smallvec![
            (0.0, 0.0),
            (w / 2.0, 0.0),
            (w / 2.0, h / 2.0),
            (w, h / 2.0),
            (w, h),
            (0.0, h),
        ],
        ShapeVariant::TShape => smallvec![
            (0.0, 0.0),
            (w, 0.0),
            (w, h / 2.0),
            (w * 0.75, h / 2.0),
            (w * 0.75, h),
            (w * 0.25, h),
            (w * 0.25, h / 2.0),
            (0.0, h / 2.0),
        ],
    }
}

/// Shoelace area of an outline (always non-negative).
pub fn outline_area(outline: &[(f32, f32)]) -> f32 {
    signed_area(outline).abs()
}

/// Signed shoelace area; positive for counter-clockwise in y-up axes.
pub fn signed_area(outline: &[(f32, f32)]) -> f32 {
    let n = outline.len();
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = outline[i];
        let (x1, y1) = outline[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts() {
        assert_eq!(footprint(ShapeVariant::Rectangle, 10.0, 10.0).len(), 4);
        assert_eq!(footprint(ShapeVariant::LShape, 10.0, 10.0).len(), 6);
        assert_eq!(footprint(ShapeVariant::TShape, 10.0, 10.0).len(), 8);
    }

    #[test]
    fn areas_match_the_removed_parts() {
        let full = outline_area(&footprint(ShapeVariant::Rectangle, 160.0, 120.0));
        assert_eq!(full, 160.0 * 120.0);
        // L loses one quarter.
        let l = outline_area(&footprint(ShapeVariant::LShape, 160.0, 120.0));
        assert_eq!(l, full * 0.75);
        // T loses two eighths (the bottom corners, each w/4 × h/2).
        let t = outline_area(&footprint(ShapeVariant::TShape, 160.0, 120.0));
        assert_eq!(t, full * 0.75);
    }
}
