//! Editor configuration.
//!
//! Every field has a default so a partial JSON object (or `{}`) is a valid
//! config. The browser host passes its settings through `EditorConfig::from_json`.

use serde::{Deserialize, Serialize};

/// Default vertical extent for elements without an explicit height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightProfile {
    /// 120 units — the compact drafting profile.
    #[default]
    Standard,
    /// 240 units — full storey height.
    Full,
}

impl HeightProfile {
    pub fn vertical_extent(self) -> f32 {
        match self {
            HeightProfile::Standard => 120.0,
            HeightProfile::Full => 240.0,
        }
    }
}

/// What to do with a generated layout whose request predates later edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleLayoutPolicy {
    /// Last writer wins: commit on top of whatever is present.
    #[default]
    Apply,
    /// Drop the result and leave the scene as the user left it.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo snapshots kept. Default: **50**.
    pub history_capacity: usize,

    pub height_profile: HeightProfile,

    /// Thickness of the perimeter walls synthesized around a new room.
    pub wall_thickness: f32,

    /// Snap step for drag and resize; also the smallest resized size.
    pub grid_size: f32,

    /// Half-width of the square resize-handle hit zone.
    pub handle_radius: f32,

    /// Anchor for elements inserted from the palette.
    pub spawn_x: f32,
    pub spawn_y: f32,

    pub stale_layouts: StaleLayoutPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            height_profile: HeightProfile::Standard,
            wall_thickness: 10.0,
            grid_size: 20.0,
            handle_radius: 25.0,
            spawn_x: 100.0,
            spawn_y: 100.0,
            stale_layouts: StaleLayoutPolicy::Apply,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid editor config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the editor cannot work with.
    ///
    /// # Errors
    /// Names the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(format!("gridSize must be positive, got {}", self.grid_size));
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness > 0.0) {
            return Err(format!(
                "wallThickness must be positive, got {}",
                self.wall_thickness
            ));
        }
        if !(self.handle_radius.is_finite() && self.handle_radius >= 0.0) {
            return Err(format!(
                "handleRadius must be non-negative, got {}",
                self.handle_radius
            ));
        }
        Ok(())
    }

    pub fn default_vertical_extent(&self) -> f32 {
        self.height_profile.vertical_extent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.default_vertical_extent(), 120.0);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config =
            EditorConfig::from_json(r#"{"historyCapacity": 30, "heightProfile": "full"}"#).unwrap();
        assert_eq!(config.history_capacity, 30);
        assert_eq!(config.default_vertical_extent(), 240.0);
        assert_eq!(config.grid_size, 20.0);
    }

    #[test]
    fn rejects_non_positive_grid() {
        let err = EditorConfig::from_json(r#"{"gridSize": 0}"#).unwrap_err();
        assert!(err.contains("gridSize"), "{err}");
    }
}
