//! Core data model for floor plans.
//!
//! A plan is a flat, ordered list of [`Element`]s. Order is paint order:
//! later elements draw on top and win hit tests. Elements never reference
//! each other — walls generated alongside a room are plain siblings.

use crate::id::ElementId;
use serde::{Deserialize, Deserializer, Serialize};

/// The live plan: an ordered sequence of elements (index = z-order).
pub type Scene = Vec<Element>;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB` or `#RRGGBB`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let (r, g, b) = match bytes.len() {
            3 => (
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
            ),
            6 => (
                hex_val(bytes[0])? << 4 | hex_val(bytes[1])?,
                hex_val(bytes[2])? << 4 | hex_val(bytes[3])?,
                hex_val(bytes[4])? << 4 | hex_val(bytes[5])?,
            ),
            _ => return None,
        };
        Some(Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ))
    }

    /// Emit as `#RRGGBB` (alpha is not part of the plan format).
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

// ─── Enumerations ────────────────────────────────────────────────────────

/// What an element represents on the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Room,
    Wall,
    Door,
    Window,
    Furniture,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Room,
        ElementKind::Wall,
        ElementKind::Door,
        ElementKind::Window,
        ElementKind::Furniture,
    ];

    /// Lowercase name, also used as the generated-id prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Room => "room",
            ElementKind::Wall => "wall",
            ElementKind::Door => "door",
            ElementKind::Window => "window",
            ElementKind::Furniture => "furniture",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Footprint outline of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeVariant {
    #[default]
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "l-shape")]
    LShape,
    #[serde(rename = "t-shape")]
    TShape,
}

impl ShapeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeVariant::Rectangle => "rectangle",
            ShapeVariant::LShape => "l-shape",
            ShapeVariant::TShape => "t-shape",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [ShapeVariant::Rectangle, ShapeVariant::LShape, ShapeVariant::TShape]
            .into_iter()
            .find(|v| v.as_str() == s)
    }
}

/// Surface material. Drives the fallback color and the 3D finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Plaster,
    Wood,
    Glass,
    Brick,
    Stone,
    Metal,
}

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Plaster,
        Material::Wood,
        Material::Glass,
        Material::Brick,
        Material::Stone,
        Material::Metal,
    ];

    /// Hex color used when an element carries no color override.
    pub fn default_color(self) -> &'static str {
        match self {
            Material::Plaster => "#f8fafc",
            Material::Wood => "#78350f",
            Material::Glass => "#bae6fd",
            Material::Brick => "#991b1b",
            Material::Stone => "#57534e",
            Material::Metal => "#475569",
        }
    }

    /// Inspector display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Material::Plaster => "Smooth Plaster",
            Material::Wood => "Polished Wood",
            Material::Glass => "Tempered Glass",
            Material::Brick => "Rough Brick",
            Material::Stone => "Natural Stone",
            Material::Metal => "Brushed Metal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plaster" => Some(Material::Plaster),
            "wood" => Some(Material::Wood),
            "glass" => Some(Material::Glass),
            "brick" => Some(Material::Brick),
            "stone" => Some(Material::Stone),
            "metal" => Some(Material::Metal),
            _ => None,
        }
    }
}

// ─── Element ─────────────────────────────────────────────────────────────

/// A single placed element.
///
/// Positive width/height is enforced by whoever edits the element
/// (tools, inspector, import), never by the type itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default, rename = "shape")]
    pub variant: ShapeVariant,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees about the element center. Circular: compare mod 360.
    #[serde(default)]
    pub rotation: f32,
    /// Extrusion height for the 3D view; `None` uses the profile default.
    #[serde(default, rename = "wallHeight", skip_serializing_if = "Option::is_none")]
    pub vertical_extent: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Material,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Element {
    /// A plain rectangular element with default material and no overrides.
    pub fn new(id: ElementId, kind: ElementKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            kind,
            variant: ShapeVariant::Rectangle,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            vertical_extent: None,
            color: None,
            material: Material::default(),
            opacity: None,
            label: None,
        }
    }

    /// Axis-aligned footprint, ignoring rotation.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Color override, or the material's default.
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .unwrap_or_else(|| self.material.default_color())
    }

    /// Rotation folded into [0, 360).
    pub fn normalized_rotation(&self) -> f32 {
        normalize_degrees(self.rotation)
    }

    /// Vertical extent, or `default` when unset or non-positive.
    pub fn extent_or(&self, default: f32) -> f32 {
        match self.vertical_extent {
            Some(h) if h > 0.0 => h,
            _ => default,
        }
    }
}

/// Fold an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f32) -> f32 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// A shallow, field-wise override applied by `update_element`.
///
/// `None` leaves a field unchanged. The optional element fields take a
/// nested option: `Some(None)` clears them, which is how `null` reads in
/// JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    #[serde(default, rename = "shape", skip_serializing_if = "Option::is_none")]
    pub variant: Option<ShapeVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(
        default,
        rename = "wallHeight",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "nullable"
    )]
    pub vertical_extent: Option<Option<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub color: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub opacity: Option<Option<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub label: Option<Option<String>>,
}

/// Present-but-null → `Some(None)`; absent fields fall back to `default`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ElementPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(Some(label.into())),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `el`. The id is never touched.
    pub fn apply_to(&self, el: &mut Element) {
        if let Some(kind) = self.kind {
            el.kind = kind;
        }
        if let Some(variant) = self.variant {
            el.variant = variant;
        }
        if let Some(x) = self.x {
            el.x = x;
        }
        if let Some(y) = self.y {
            el.y = y;
        }
        if let Some(w) = self.width {
            el.width = w;
        }
        if let Some(h) = self.height {
            el.height = h;
        }
        if let Some(r) = self.rotation {
            el.rotation = r;
        }
        if let Some(h) = self.vertical_extent {
            el.vertical_extent = h;
        }
        if let Some(c) = &self.color {
            el.color.clone_from(c);
        }
        if let Some(m) = self.material {
            el.material = m;
        }
        if let Some(o) = self.opacity {
            el.opacity = o;
        }
        if let Some(l) = &self.label {
            el.label.clone_from(l);
        }
    }
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in plan coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if this bounds intersects with a rectangle (AABB overlap).
    pub fn intersects_rect(&self, rx: f32, ry: f32, rw: f32, rh: f32) -> bool {
        self.x < rx + rw
            && self.x + self.width > rx
            && self.y < ry + rh
            && self.y + self.height > ry
    }
}
