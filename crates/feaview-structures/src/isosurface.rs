//! Isosurface shell structure.

use glam::Vec3;

use feaview_core::contours::IsosurfaceMesh;
use feaview_core::drawable::{points_bounding_box, Drawable, RenderBatch};

/// One extracted isosurface, colored by the field value it sits at.
///
/// Shells are unwelded display geometry straight from the extraction; face
/// orientation is arbitrary and relies on two-sided lighting.
pub struct IsosurfaceShell {
    name: String,
    mesh: IsosurfaceMesh,
    color: Vec3,
    alpha: f32,
}

impl IsosurfaceShell {
    /// Wraps an extracted isosurface for display.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: IsosurfaceMesh, color: Vec3) -> Self {
        Self {
            name: name.into(),
            mesh,
            color,
            alpha: 1.0,
        }
    }

    /// Sets the shell opacity.
    pub fn set_alpha(&mut self, alpha: f32) -> &mut Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Returns the field value this shell sits at.
    #[must_use]
    pub fn level(&self) -> f32 {
        self.mesh.value
    }

    /// Returns true if the extraction produced no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

impl Drawable for IsosurfaceShell {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "IsosurfaceShell"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        points_bounding_box(&self.mesh.vertices)
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        let color = [self.color.x, self.color.y, self.color.z, self.alpha];
        for tri in &self.mesh.triangles {
            batch.push_triangle(
                self.mesh.vertices[tri[0] as usize],
                self.mesh.vertices[tri[1] as usize],
                self.mesh.vertices[tri[2] as usize],
                color,
                1.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_matches_triangle_count() {
        let mesh = IsosurfaceMesh {
            value: 0.5,
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            triangles: vec![[0, 1, 2]],
        };
        let shell = IsosurfaceShell::new("shell", mesh, Vec3::ONE);
        let mut batch = RenderBatch::default();
        shell.collect(&mut batch, 1.0);
        assert_eq!(batch.triangles.len(), 3);
        assert!((shell.level() - 0.5).abs() < 1e-6);
    }
}
