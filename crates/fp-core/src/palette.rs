//! Insertion palette and element templates.
//!
//! A template is everything an element needs except its id. The history
//! layer assigns ids when it instantiates a template, so templates can be
//! built (and reused) without touching the live scene.

use crate::id::ElementId;
use crate::model::{Element, ElementKind, Material, ShapeVariant};

/// One entry in the insertion palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteItem {
    pub kind: ElementKind,
    pub label: &'static str,
    pub color: &'static str,
    pub material: Material,
    pub default_width: f32,
    pub default_height: f32,
}

pub const SHAPE_PALETTE: [PaletteItem; 5] = [
    PaletteItem {
        kind: ElementKind::Room,
        label: "Living Space",
        color: "#cbd5e1",
        material: Material::Plaster,
        default_width: 160.0,
        default_height: 120.0,
    },
    PaletteItem {
        kind: ElementKind::Wall,
        label: "Main Wall",
        color: "#475569",
        material: Material::Brick,
        default_width: 100.0,
        default_height: 10.0,
    },
    PaletteItem {
        kind: ElementKind::Door,
        label: "Oak Door",
        color: "#b45309",
        material: Material::Wood,
        default_width: 40.0,
        default_height: 8.0,
    },
    PaletteItem {
        kind: ElementKind::Window,
        label: "Glass Window",
        color: "#bae6fd",
        material: Material::Glass,
        default_width: 60.0,
        default_height: 6.0,
    },
    PaletteItem {
        kind: ElementKind::Furniture,
        label: "Master Bed",
        color: "#6366f1",
        material: Material::Metal,
        default_width: 80.0,
        default_height: 100.0,
    },
];

/// Palette entry for `kind`. Every kind has exactly one.
pub fn palette_item(kind: ElementKind) -> &'static PaletteItem {
    match kind {
        ElementKind::Room => &SHAPE_PALETTE[0],
        ElementKind::Wall => &SHAPE_PALETTE[1],
        ElementKind::Door => &SHAPE_PALETTE[2],
        ElementKind::Window => &SHAPE_PALETTE[3],
        ElementKind::Furniture => &SHAPE_PALETTE[4],
    }
}

impl PaletteItem {
    /// Template for this item anchored at (`x`, `y`).
    pub fn template(&self, variant: ShapeVariant, x: f32, y: f32) -> ElementTemplate {
        ElementTemplate {
            kind: self.kind,
            variant,
            x,
            y,
            width: self.default_width,
            height: self.default_height,
            color: Some(self.color.to_string()),
            material: self.material,
            vertical_extent: None,
            label: None,
        }
    }
}

/// A draft element without an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTemplate {
    pub kind: ElementKind,
    pub variant: ShapeVariant,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Option<String>,
    pub material: Material,
    pub vertical_extent: Option<f32>,
    pub label: Option<String>,
}

impl ElementTemplate {
    /// Whether inserting this template also synthesizes perimeter walls.
    pub fn wants_perimeter(&self) -> bool {
        self.kind == ElementKind::Room && self.variant == ShapeVariant::Rectangle
    }

    pub fn instantiate(&self, id: ElementId, default_extent: f32) -> Element {
        Element {
            id,
            kind: self.kind,
            variant: self.variant,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: 0.0,
            vertical_extent: Some(self.vertical_extent.unwrap_or(default_extent)),
            color: self.color.clone(),
            material: self.material,
            opacity: None,
            label: self.label.clone(),
        }
    }
}

/// Four wall templates enclosing `room`, offset outward by `thickness`.
///
/// Top and bottom walls span the full outer width (corners included);
/// left and right walls fill the gap between them.
pub fn perimeter_walls(room: &Element, thickness: f32) -> [ElementTemplate; 4] {
    let t = thickness;
    let (x, y, w, h) = (room.x, room.y, room.width, room.height);
    let wall = |x: f32, y: f32, width: f32, height: f32| {
        let item = palette_item(ElementKind::Wall);
        ElementTemplate {
            width,
            height,
            vertical_extent: room.vertical_extent,
            ..item.template(ShapeVariant::Rectangle, x, y)
        }
    };
    [
        wall(x - t, y - t, w + 2.0 * t, t),
        wall(x - t, y + h, w + 2.0 * t, t),
        wall(x - t, y, t, h),
        wall(x + w, y, t, h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bounds;

    #[test]
    fn every_kind_has_a_palette_entry() {
        for kind in ElementKind::ALL {
            assert_eq!(palette_item(kind).kind, kind);
        }
    }

    #[test]
    fn only_rectangular_rooms_get_walls() {
        let room = palette_item(ElementKind::Room);
        assert!(room.template(ShapeVariant::Rectangle, 0.0, 0.0).wants_perimeter());
        assert!(!room.template(ShapeVariant::LShape, 0.0, 0.0).wants_perimeter());
        let door = palette_item(ElementKind::Door);
        assert!(!door.template(ShapeVariant::Rectangle, 0.0, 0.0).wants_perimeter());
    }

    #[test]
    fn perimeter_encloses_room() {
        let room = palette_item(ElementKind::Room)
            .template(ShapeVariant::Rectangle, 100.0, 100.0)
            .instantiate(ElementId::intern("r"), 120.0);
        let walls = perimeter_walls(&room, 10.0);

        let boxes: Vec<Bounds> = walls
            .iter()
            .map(|t| Bounds {
                x: t.x,
                y: t.y,
                width: t.width,
                height: t.height,
            })
            .collect();
        assert_eq!(boxes[0], Bounds { x: 90.0, y: 90.0, width: 180.0, height: 10.0 });
        assert_eq!(boxes[1], Bounds { x: 90.0, y: 220.0, width: 180.0, height: 10.0 });
        assert_eq!(boxes[2], Bounds { x: 90.0, y: 100.0, width: 10.0, height: 120.0 });
        assert_eq!(boxes[3], Bounds { x: 260.0, y: 100.0, width: 10.0, height: 120.0 });

        // None of the walls overlap the room interior.
        for b in &boxes {
            assert!(!room.bounds().intersects_rect(b.x, b.y, b.width, b.height));
        }
        assert!(walls.iter().all(|t| t.kind == ElementKind::Wall));
        assert!(walls.iter().all(|t| t.material == Material::Brick));
    }
}
