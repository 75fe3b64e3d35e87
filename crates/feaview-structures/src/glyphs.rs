//! Glyph structures: boundary-condition cones and vector-field arrows.

use glam::Vec3;

use feaview_core::drawable::{points_bounding_box, Drawable, RenderBatch};

/// Default cone height for boundary-condition markers, in model units.
pub const BC_CONE_HEIGHT: f32 = 50.0;

/// Circle resolution for cone glyph bases.
const CONE_SEGMENTS: usize = 24;

/// Circle resolution for arrow shafts and heads. Deliberately coarse:
/// hundreds of arrows per field.
const ARROW_SEGMENTS: usize = 4;

/// Returns two unit vectors orthogonal to `axis` and each other.
fn orthonormal_basis(axis: Vec3) -> (Vec3, Vec3) {
    let reference = if axis.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u = axis.cross(reference).normalize_or_zero();
    let v = axis.cross(u).normalize_or_zero();
    (u, v)
}

/// Emits one cone as triangles: apex, axis direction, height, base radius.
fn emit_cone(
    batch: &mut RenderBatch,
    apex: Vec3,
    axis: Vec3,
    height: f32,
    radius: f32,
    segments: usize,
    color: [f32; 4],
    shade: f32,
) {
    let center = apex + axis * height;
    let (u, v) = orthonormal_basis(axis);

    #[allow(clippy::cast_precision_loss)]
    let ring: Vec<Vec3> = (0..segments)
        .map(|i| {
            let t = std::f32::consts::TAU * i as f32 / segments as f32;
            center + (u * t.cos() + v * t.sin()) * radius
        })
        .collect();

    for i in 0..segments {
        let a = ring[i];
        let b = ring[(i + 1) % segments];
        batch.push_triangle(apex, a, b, color, shade);
        batch.push_triangle(center, b, a, color, shade);
    }
}

/// Boundary-condition markers: one cone per constrained node, tip at the
/// node, body extending along +Z.
pub struct ConeGlyphs {
    name: String,
    positions: Vec<Vec3>,
    height: f32,
    color: Vec3,
    alpha: f32,
}

impl ConeGlyphs {
    /// Creates boundary-condition cones with the default red styling.
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            positions,
            height: BC_CONE_HEIGHT,
            color: Vec3::new(0.9, 0.1, 0.1),
            alpha: 0.8,
        }
    }

    /// Sets the cone height in model units.
    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height.max(0.0);
        self
    }

    /// Returns the glyph tip positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

impl Drawable for ConeGlyphs {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "ConeGlyphs"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let (min, max) = points_bounding_box(&self.positions)?;
        Some((min, max + Vec3::Z * self.height))
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        let color = [self.color.x, self.color.y, self.color.z, self.alpha];
        for &tip in &self.positions {
            // Ambient-only shading keeps the markers uniformly red
            emit_cone(
                batch,
                tip,
                Vec3::Z,
                self.height,
                self.height * 0.3,
                CONE_SEGMENTS,
                color,
                0.0,
            );
        }
    }
}

/// A field of displacement arrows, one per node.
pub struct ArrowField {
    name: String,
    starts: Vec<Vec3>,
    vectors: Vec<Vec3>,
    scale: f32,
    color: Vec3,
    alpha: f32,
}

impl ArrowField {
    /// Creates an arrow field with the default translucent blue styling.
    ///
    /// `starts` and `vectors` are matched pairwise; extra entries on either
    /// side are ignored.
    #[must_use]
    pub fn new(name: impl Into<String>, starts: Vec<Vec3>, vectors: Vec<Vec3>, scale: f32) -> Self {
        Self {
            name: name.into(),
            starts,
            vectors,
            scale,
            color: Vec3::new(0.0, 0.0, 1.0),
            alpha: 0.1,
        }
    }

    /// Returns the number of arrows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len().min(self.vectors.len())
    }

    /// Returns true if the field has no arrows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drawable for ArrowField {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "ArrowField"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        points_bounding_box(&self.starts)
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        let color = [self.color.x, self.color.y, self.color.z, self.alpha];
        for (&start, &vector) in self.starts.iter().zip(&self.vectors) {
            let offset = vector * self.scale;
            let len = offset.length();
            if len <= f32::EPSILON {
                continue;
            }
            let axis = offset / len;
            let head_len = len * 0.25;
            let shaft_len = len - head_len;
            let shaft_radius = len * 0.02;
            let head_radius = len * 0.06;

            // Shaft: open prism with ARROW_SEGMENTS sides
            let (u, v) = orthonormal_basis(axis);
            #[allow(clippy::cast_precision_loss)]
            let ring: Vec<Vec3> = (0..ARROW_SEGMENTS)
                .map(|i| {
                    let t = std::f32::consts::TAU * i as f32 / ARROW_SEGMENTS as f32;
                    (u * t.cos() + v * t.sin()) * shaft_radius
                })
                .collect();
            let shaft_end = start + axis * shaft_len;
            for i in 0..ARROW_SEGMENTS {
                let a = ring[i];
                let b = ring[(i + 1) % ARROW_SEGMENTS];
                batch.push_triangle(start + a, start + b, shaft_end + b, color, 1.0);
                batch.push_triangle(start + a, shaft_end + b, shaft_end + a, color, 1.0);
            }

            // Head: cone from the tip back toward the shaft
            emit_cone(
                batch,
                start + offset,
                -axis,
                head_len,
                head_radius,
                ARROW_SEGMENTS,
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
    fn test_cone_tip_sits_at_node() {
        let node = Vec3::new(1.0, 2.0, 3.0);
        let glyphs = ConeGlyphs::new("bc", vec![node]);
        let mut batch = RenderBatch::default();
        glyphs.collect(&mut batch, 1.0);
        // Every triangle fan starts at the apex
        assert_eq!(batch.triangles[0].position, node.to_array());
        // Body extends upward by the default height
        let max_z = batch
            .triangles
            .iter()
            .map(|v| v.position[2])
            .fold(f32::MIN, f32::max);
        assert!((max_z - (node.z + BC_CONE_HEIGHT)).abs() < 1e-4);
    }

    #[test]
    fn test_cone_bounding_box_includes_body() {
        let glyphs = ConeGlyphs::new("bc", vec![Vec3::ZERO]);
        let (_, max) = glyphs.bounding_box().unwrap();
        assert!((max.z - BC_CONE_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vectors_are_skipped() {
        let field = ArrowField::new("u", vec![Vec3::ZERO], vec![Vec3::ZERO], 1.0);
        let mut batch = RenderBatch::default();
        field.collect(&mut batch, 1.0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_arrow_reaches_scaled_endpoint() {
        let field = ArrowField::new("u", vec![Vec3::ZERO], vec![Vec3::X], 2.0);
        let mut batch = RenderBatch::default();
        field.collect(&mut batch, 1.0);
        assert!(!batch.is_empty());
        let max_x = batch
            .triangles
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - 2.0).abs() < 1e-4);
    }
}
