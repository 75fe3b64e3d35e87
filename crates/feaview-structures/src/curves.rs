//! Isoline curve structure.

use glam::Vec3;

use feaview_core::contours::IsolineLevel;
use feaview_core::drawable::{Drawable, RenderBatch};

/// A family of isolines extracted from one scalar field, drawn as black
/// line segments over the surface they were traced on.
#[derive(Debug, Clone)]
pub struct IsolineSet {
    name: String,
    levels: Vec<IsolineLevel>,
    color: Vec3,
}

impl IsolineSet {
    /// Wraps extracted isoline levels for display.
    #[must_use]
    pub fn new(name: impl Into<String>, levels: Vec<IsolineLevel>) -> Self {
        Self {
            name: name.into(),
            levels,
            color: Vec3::ZERO,
        }
    }

    /// Sets the line color.
    pub fn set_color(&mut self, color: Vec3) -> &mut Self {
        self.color = color;
        self
    }

    /// Returns the levels.
    #[must_use]
    pub fn levels(&self) -> &[IsolineLevel] {
        &self.levels
    }

    /// Total segment count across all levels.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.levels.iter().map(|l| l.segments.len()).sum()
    }
}

impl Drawable for IsolineSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "IsolineSet"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;
        for level in &self.levels {
            for &(a, b) in &level.segments {
                min = min.min(a).min(b);
                max = max.max(a).max(b);
                any = true;
            }
        }
        any.then_some((min, max))
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        let color = [self.color.x, self.color.y, self.color.z, 1.0];
        for level in &self.levels {
            for &(a, b) in &level.segments {
                batch.push_line(a, b, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_become_line_vertices() {
        let set = IsolineSet::new(
            "iso",
            vec![IsolineLevel {
                value: 0.5,
                segments: vec![(Vec3::ZERO, Vec3::X), (Vec3::X, Vec3::Y)],
            }],
        );
        let mut batch = RenderBatch::default();
        set.collect(&mut batch, 1.0);
        assert_eq!(batch.lines.len(), 4);
        assert_eq!(set.segment_count(), 2);
    }

    #[test]
    fn test_empty_set_has_no_extent() {
        let set = IsolineSet::new("iso", vec![]);
        assert!(set.bounding_box().is_none());
    }
}
