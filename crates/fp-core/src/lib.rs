pub mod config;
pub mod id;
pub mod lint;
pub mod model;
pub mod palette;
pub mod scene_io;
pub mod shape;

pub use config::{EditorConfig, HeightProfile, StaleLayoutPolicy};
pub use id::ElementId;
pub use lint::{LintDiagnostic, LintSeverity, check_scene, lint_scene};
pub use model::*;
pub use palette::{ElementTemplate, PaletteItem, SHAPE_PALETTE, palette_item, perimeter_walls};
pub use scene_io::{
    scene_from_json, scene_from_layout_json, scene_from_msgpack, scene_to_json, scene_to_msgpack,
};
