//! Hit testing: point → element lookup.
//!
//! Walks the scene back to front (last painted = topmost) and tests the
//! rotated footprint, so L- and T-shaped elements are only hit inside
//! their arms.

use crate::outline::{plan_bounds, plan_outline};
use fp_core::id::ElementId;
use fp_core::model::Element;
use kurbo::{Point, Shape};

/// Find the topmost element at plan position (px, py).
/// Returns `None` if nothing is hit (background).
pub fn hit_test(elements: &[Element], px: f32, py: f32) -> Option<ElementId> {
    let pt = Point::new(f64::from(px), f64::from(py));
    let hit = elements
        .iter()
        .rev()
        .find(|el| plan_outline(el).contains(pt))
        .map(|el| el.id);
    log::trace!("hit_test ({px}, {py}) -> {hit:?}");
    hit
}

/// All elements whose rotated bounding box overlaps the given rectangle,
/// in paint order. Used for marquee (box) selection.
pub fn hit_test_rect(elements: &[Element], rx: f32, ry: f32, rw: f32, rh: f32) -> Vec<ElementId> {
    let (x0, y0) = (f64::from(rx), f64::from(ry));
    let (x1, y1) = (x0 + f64::from(rw), y0 + f64::from(rh));
    elements
        .iter()
        .filter(|el| {
            let b = plan_bounds(el);
            b.x0 < x1 && b.x1 > x0 && b.y0 < y1 && b.y1 > y0
        })
        .map(|el| el.id)
        .collect()
}

/// Whether (px, py) grabs the resize handle at the element's bottom-right
/// corner. The handle sits on the unrotated box.
pub fn resize_handle_hit(el: &Element, px: f32, py: f32, radius: f32) -> bool {
    (px - (el.x + el.width)).abs() < radius && (py - (el.y + el.height)).abs() < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::model::{ElementKind, ShapeVariant};
    use pretty_assertions::assert_eq;

    fn el(id: &str, x: f32, y: f32, w: f32, h: f32) -> Element {
        Element::new(ElementId::intern(id), ElementKind::Furniture, x, y, w, h)
    }

    #[test]
    fn topmost_wins_on_overlap() {
        let scene = vec![el("below", 0.0, 0.0, 100.0, 100.0), el("above", 50.0, 50.0, 100.0, 100.0)];
        assert_eq!(hit_test(&scene, 75.0, 75.0), Some(ElementId::intern("above")));
        assert_eq!(hit_test(&scene, 25.0, 25.0), Some(ElementId::intern("below")));
        assert_eq!(hit_test(&scene, 400.0, 400.0), None);
    }

    #[test]
    fn l_shape_notch_is_not_hit() {
        let mut sofa = el("sofa", 0.0, 0.0, 100.0, 100.0);
        sofa.variant = ShapeVariant::LShape;
        let scene = vec![sofa];
        // Top-right quarter is cut away.
        assert_eq!(hit_test(&scene, 75.0, 25.0), None);
        assert_eq!(hit_test(&scene, 25.0, 25.0), Some(ElementId::intern("sofa")));
        assert_eq!(hit_test(&scene, 75.0, 75.0), Some(ElementId::intern("sofa")));
    }

    #[test]
    fn rotation_moves_the_hit_area() {
        let mut wall = el("spin", 0.0, 0.0, 100.0, 10.0);
        assert!(hit_test(std::slice::from_ref(&wall), 90.0, 5.0).is_some());
        wall.rotation = 90.0;
        // Now a vertical bar centred on (50, 5).
        assert!(hit_test(std::slice::from_ref(&wall), 90.0, 5.0).is_none());
        assert!(hit_test(std::slice::from_ref(&wall), 50.0, 40.0).is_some());
    }

    #[test]
    fn marquee_collects_overlapping_in_order() {
        let scene = vec![
            el("a", 0.0, 0.0, 10.0, 10.0),
            el("b", 100.0, 100.0, 10.0, 10.0),
            el("c", 5.0, 5.0, 10.0, 10.0),
        ];
        let hits = hit_test_rect(&scene, 0.0, 0.0, 20.0, 20.0);
        assert_eq!(hits, vec![ElementId::intern("a"), ElementId::intern("c")]);
    }

    #[test]
    fn handle_sits_at_bottom_right() {
        let e = el("h", 100.0, 100.0, 80.0, 60.0);
        assert!(resize_handle_hit(&e, 190.0, 170.0, 25.0));
        assert!(!resize_handle_hit(&e, 100.0, 100.0, 25.0));
    }
}
