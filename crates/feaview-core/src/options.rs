//! Display configuration for feaview.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Shared display defaults for all viewers.
///
/// These are the values the model- and part-level viewers fall back to when an
/// operation does not specify its own styling. The defaults mirror common FEA
/// post-processor conventions: red nodes, translucent light-blue meshes, and
/// the `jet` color map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Window title.
    pub title: String,

    /// Window size in logical pixels (width, height).
    pub window_size: (u32, u32),

    /// Panel grid layout (rows, cols). Panel 0 is the top-left panel;
    /// panels are numbered row-major.
    pub panel_layout: (usize, usize),

    /// Background color.
    pub background_color: Vec3,

    /// Node point color.
    pub point_color: Vec3,

    /// Node point size, as a fraction of 1% of the scene length scale.
    pub point_size: f32,

    /// Base element mesh color.
    pub mesh_color: Vec3,

    /// Base element mesh opacity (0 = invisible, 1 = opaque).
    pub mesh_alpha: f32,

    /// Name of the color map used when an operation requests scalar coloring
    /// without naming a map. Also the documented default applied when isolines
    /// or isosurfaces are requested without an explicit color map.
    pub color_map: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: "FEA Model Viewer".to_string(),
            window_size: (1200, 800),
            panel_layout: (2, 2),
            background_color: Vec3::new(1.0, 1.0, 1.0),
            point_color: Vec3::new(0.9, 0.1, 0.1),
            point_size: 5.0,
            mesh_color: Vec3::new(0.68, 0.85, 0.90),
            mesh_alpha: 0.8,
            color_map: "jet".to_string(),
        }
    }
}

impl DisplayOptions {
    /// Returns the total number of panels in the grid.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panel_layout.0 * self.panel_layout.1
    }

    /// Serializes the options to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DisplayOptions::default();
        assert_eq!(options.panel_layout, (2, 2));
        assert_eq!(options.panel_count(), 4);
        assert_eq!(options.color_map, "jet");
        assert_eq!(options.mesh_alpha, 0.8);
    }

    #[test]
    fn test_json_round_trip() {
        let options = DisplayOptions::default();
        let json = options.to_json().expect("serialize failed");
        let restored = DisplayOptions::from_json(&json).expect("deserialize failed");
        assert_eq!(restored.panel_layout, options.panel_layout);
        assert_eq!(restored.color_map, options.color_map);
        assert_eq!(restored.point_size, options.point_size);
    }
}
