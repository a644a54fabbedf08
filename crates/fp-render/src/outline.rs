//! Element → plan-space outline.
//!
//! The outline is the footprint polygon placed at the element's anchor and
//! rotated about the element's center. Hit testing, marquee selection and
//! any canvas painter all work from this one path.

use fp_core::model::Element;
use fp_core::shape::footprint;
use kurbo::{Affine, BezPath, Point, Rect, Shape};

/// Local → plan transform: rotate about the box center, then translate to
/// the anchor. Canvas convention: positive degrees turn clockwise on a
/// y-down screen.
pub fn plan_transform(el: &Element) -> Affine {
    let center = Point::new(f64::from(el.width) / 2.0, f64::from(el.height) / 2.0);
    let theta = f64::from(el.normalized_rotation()).to_radians();
    Affine::translate((f64::from(el.x), f64::from(el.y))) * Affine::rotate_about(theta, center)
}

/// Closed outline of the element in plan coordinates.
pub fn plan_outline(el: &Element) -> BezPath {
    let mut path = BezPath::new();
    for (i, &(x, y)) in footprint(el.variant, el.width, el.height).iter().enumerate() {
        let p = Point::new(f64::from(x), f64::from(y));
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path.apply_affine(plan_transform(el));
    path
}

/// Axis-aligned box around the rotated outline.
pub fn plan_bounds(el: &Element) -> Rect {
    plan_outline(el).bounding_box()
}
