//! Drawable trait and CPU-side render batches.
//!
//! A [`Drawable`] is a geometric object that can appear in a scene panel: a
//! point cloud, a tetrahedral mesh, a set of glyphs. Drawables emit their
//! geometry into a [`RenderBatch`] of plain triangle/line vertices, which the
//! render backend uploads wholesale. Keeping the batch CPU-side means every
//! structure can be exercised in tests without a GPU device.

use glam::Vec3;

/// A single shaded triangle vertex.
///
/// `shade` selects the lighting model per vertex: 1.0 = lambert (normal-based
/// diffuse plus ambient), 0.0 = ambient only (flat color, no shading gradient).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Face or vertex normal.
    pub normal: [f32; 3],
    /// RGBA color; alpha is the opacity of the owning structure.
    pub color: [f32; 4],
    /// Lighting selector (1.0 lambert, 0.0 ambient-only).
    pub shade: f32,
}

/// A single line-segment vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Geometry collected from the drawables of one panel.
///
/// Triangles and lines are in world space. Overlay triangles are in normalized
/// device coordinates of the owning panel and bypass the camera; scale bars
/// are emitted there.
#[derive(Debug, Default, Clone)]
pub struct RenderBatch {
    /// Shaded world-space triangles, 3 vertices per triangle.
    pub triangles: Vec<MeshVertex>,
    /// World-space line segments, 2 vertices per segment.
    pub lines: Vec<LineVertex>,
    /// Screen-space (NDC) overlay triangles, 3 vertices per triangle.
    pub overlay: Vec<MeshVertex>,
}

impl RenderBatch {
    /// Returns true if the batch holds no geometry at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty() && self.overlay.is_empty()
    }

    /// Pushes one world-space triangle with a flat normal computed from its
    /// winding order.
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4], shade: f32) {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        for p in [a, b, c] {
            self.triangles.push(MeshVertex {
                position: p.to_array(),
                normal: normal.to_array(),
                color,
                shade,
            });
        }
    }

    /// Pushes one world-space line segment.
    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        for p in [a, b] {
            self.lines.push(LineVertex {
                position: p.to_array(),
                color,
            });
        }
    }
}

/// A geometric object that can be placed in a scene panel.
pub trait Drawable {
    /// Returns the name of this drawable.
    fn name(&self) -> &str;

    /// Returns the type name of this drawable (e.g. "`TetMesh`", "`PointCloud`").
    fn type_name(&self) -> &'static str;

    /// Returns the axis-aligned bounding box, or `None` for drawables with no
    /// spatial extent (screen-space overlays).
    fn bounding_box(&self) -> Option<(Vec3, Vec3)>;

    /// Returns whether this drawable is currently visible.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Emits this drawable's geometry into the batch.
    ///
    /// `length_scale` is the scene length scale, for geometry whose size is
    /// relative to the scene (point markers, grid spacing).
    fn collect(&self, batch: &mut RenderBatch, length_scale: f32);
}

/// Computes the bounding box of a point set, or `None` if empty.
#[must_use]
pub fn points_bounding_box(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min = min.min(*p);
        max = max.max(*p);
    }
    Some((min, max))
}
