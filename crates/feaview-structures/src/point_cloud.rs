//! Point cloud structure.

use glam::Vec3;

use feaview_core::drawable::{points_bounding_box, Drawable, RenderBatch};

/// A set of node markers drawn as small octahedra.
///
/// Marker size is relative to the scene length scale so nodes stay visible
/// regardless of model units.
pub struct PointCloud {
    name: String,
    points: Vec<Vec3>,
    color: Vec3,
    /// Marker size in the display-point convention; 5.0 matches the default
    /// node markers.
    size: f32,
    enabled: bool,
}

/// Fraction of the scene length scale covered by one display point.
const POINT_SCALE: f32 = 0.001;

impl PointCloud {
    /// Creates a point cloud with the default red node-marker styling.
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            points,
            color: Vec3::new(0.9, 0.1, 0.1),
            size: 5.0,
            enabled: true,
        }
    }

    /// Sets the marker color.
    pub fn set_color(&mut self, color: Vec3) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the marker size.
    pub fn set_size(&mut self, size: f32) -> &mut Self {
        self.size = size.max(0.0);
        self
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cloud holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Drawable for PointCloud {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "PointCloud"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        points_bounding_box(&self.points)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn collect(&self, batch: &mut RenderBatch, length_scale: f32) {
        let r = self.size * POINT_SCALE * length_scale;
        if r <= 0.0 {
            return;
        }
        let color = [self.color.x, self.color.y, self.color.z, 1.0];

        for &p in &self.points {
            // Octahedron: 6 apex points, 8 triangles
            let xp = p + Vec3::X * r;
            let xn = p - Vec3::X * r;
            let yp = p + Vec3::Y * r;
            let yn = p - Vec3::Y * r;
            let zp = p + Vec3::Z * r;
            let zn = p - Vec3::Z * r;

            for (a, b) in [(xp, yp), (yp, xn), (xn, yn), (yn, xp)] {
                batch.push_triangle(a, b, zp, color, 0.0);
                batch.push_triangle(b, a, zn, color, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octahedron_per_point() {
        let cloud = PointCloud::new("nodes", vec![Vec3::ZERO, Vec3::X]);
        let mut batch = RenderBatch::default();
        cloud.collect(&mut batch, 1.0);
        assert_eq!(batch.triangles.len(), 2 * 8 * 3);
        // Markers are unshaded
        assert_eq!(batch.triangles[0].shade, 0.0);
    }

    #[test]
    fn test_zero_size_emits_nothing() {
        let mut cloud = PointCloud::new("nodes", vec![Vec3::ZERO]);
        cloud.set_size(0.0);
        let mut batch = RenderBatch::default();
        cloud.collect(&mut batch, 1.0);
        assert!(batch.is_empty());
    }
}
