//! Planar polygon patch structure.

use glam::Vec3;

use feaview_core::drawable::{points_bounding_box, Drawable, RenderBatch};

/// A filled polygon from an ordered point loop, fan-triangulated from the
/// first point. Used to display interface surfaces between parts.
///
/// Needs at least 3 points; callers are expected to filter degenerate loops
/// before constructing one.
pub struct PolygonPatch {
    name: String,
    points: Vec<Vec3>,
    color: Vec3,
    alpha: f32,
}

impl PolygonPatch {
    /// Creates a polygon patch.
    #[must_use]
    pub fn new(name: impl Into<String>, points: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            points,
            color: Vec3::new(0.9, 0.6, 0.2),
            alpha: 0.9,
        }
    }

    /// Sets the fill color.
    pub fn set_color(&mut self, color: Vec3) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the fill opacity.
    pub fn set_alpha(&mut self, alpha: f32) -> &mut Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Returns the boundary points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

impl Drawable for PolygonPatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "PolygonPatch"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        points_bounding_box(&self.points)
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        if self.points.len() < 3 {
            return;
        }
        let color = [self.color.x, self.color.y, self.color.z, self.alpha];
        let anchor = self.points[0];
        for pair in self.points[1..].windows(2) {
            batch.push_triangle(anchor, pair[0], pair[1], color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_triangulation_counts() {
        let quad = PolygonPatch::new(
            "patch",
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
        );
        let mut batch = RenderBatch::default();
        quad.collect(&mut batch, 1.0);
        // n points fan into n - 2 triangles
        assert_eq!(batch.triangles.len(), 2 * 3);
    }

    #[test]
    fn test_degenerate_loop_emits_nothing() {
        let line = PolygonPatch::new("patch", vec![Vec3::ZERO, Vec3::X]);
        let mut batch = RenderBatch::default();
        line.collect(&mut batch, 1.0);
        assert!(batch.is_empty());
    }
}
