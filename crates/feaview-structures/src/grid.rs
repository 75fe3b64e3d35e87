//! Ground grid structure.

use glam::Vec3;

use feaview_core::drawable::{Drawable, RenderBatch};

/// Line divisions per side of the grid.
const GRID_DIVISIONS: usize = 10;

/// A square reference grid in the XY plane, sized and placed to sit under
/// the model.
pub struct GroundGrid {
    center: Vec3,
    extent: f32,
    color: Vec3,
}

impl GroundGrid {
    /// Creates a grid centered under the given point with the given side
    /// length.
    #[must_use]
    pub fn new(center: Vec3, extent: f32) -> Self {
        Self {
            center,
            extent: extent.max(f32::EPSILON),
            color: Vec3::splat(0.6),
        }
    }

    /// Creates a grid fitted under a bounding box: centered in XY, placed at
    /// the bottom in Z, with some margin around the footprint.
    #[must_use]
    pub fn fitted(min: Vec3, max: Vec3) -> Self {
        let center = Vec3::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5, min.z);
        let extent = (max - min).truncate().max_element() * 1.5;
        Self::new(center, extent)
    }
}

impl Drawable for GroundGrid {
    fn name(&self) -> &str {
        "ground grid"
    }

    fn type_name(&self) -> &'static str {
        "GroundGrid"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        // Reference geometry never grows the scene extent
        None
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        let color = [self.color.x, self.color.y, self.color.z, 1.0];
        let half = self.extent * 0.5;

        #[allow(clippy::cast_precision_loss)]
        for i in 0..=GRID_DIVISIONS {
            let t = -half + self.extent * i as f32 / GRID_DIVISIONS as f32;
            batch.push_line(
                self.center + Vec3::new(t, -half, 0.0),
                self.center + Vec3::new(t, half, 0.0),
                color,
            );
            batch.push_line(
                self.center + Vec3::new(-half, t, 0.0),
                self.center + Vec3::new(half, t, 0.0),
                color,
            );
        }
    }
}
