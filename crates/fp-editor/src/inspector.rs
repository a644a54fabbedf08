//! Property-inspector edits.
//!
//! The inspector is the main edit boundary for typed-in values. Form
//! fields arrive as raw strings; this module parses them the way the
//! browser form does (a leading integer, anything else reads as 0) and
//! enforces the element invariants before anything reaches the history.

use fp_core::model::{Color, ElementPatch, Material, normalize_degrees};

/// Smallest width/height the inspector will accept.
pub const MIN_SIZE: f32 = 1.0;

/// One inspector field change.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorEdit {
    Label(String),
    /// Raw text of the rotation field, in degrees.
    Rotation(String),
    /// Raw text of the height field.
    VerticalExtent(String),
    /// Raw width and height fields.
    Size { width: String, height: String },
    /// Hex from the color picker.
    Color(String),
    Material(Material),
}

impl InspectorEdit {
    /// Convert to a patch. Returns `None` when the edit cannot be applied:
    /// an unparseable color, or a number too large to be finite.
    pub fn into_patch(self) -> Option<ElementPatch> {
        let mut patch = ElementPatch::default();
        match self {
            InspectorEdit::Label(label) => patch.label = Some(Some(label)),
            InspectorEdit::Rotation(raw) => {
                patch.rotation = Some(normalize_degrees(finite_int(&raw)?));
            }
            InspectorEdit::VerticalExtent(raw) => {
                patch.vertical_extent = Some(Some(finite_int(&raw)?.max(0.0)));
            }
            InspectorEdit::Size { width, height } => {
                patch.width = Some(finite_int(&width)?.max(MIN_SIZE));
                patch.height = Some(finite_int(&height)?.max(MIN_SIZE));
            }
            InspectorEdit::Color(hex) => {
                patch.color = Some(Some(Color::from_hex(&hex)?.to_hex()));
            }
            InspectorEdit::Material(material) => patch.material = Some(material),
        }
        Some(patch)
    }
}

fn finite_int(raw: &str) -> Option<f32> {
    let v = lenient_int(raw);
    if v.is_finite() {
        Some(v)
    } else {
        log::debug!("inspector value out of range: {raw:?}");
        None
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits.
/// `"42.7cm"` → 42, `"abc"` → 0, `"-15"` → -15. Digit runs beyond the
/// `f32` range come back infinite.
pub fn lenient_int(raw: &str) -> f32 {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<f32>()
        .map_or(0.0, |v| sign * v)
}
