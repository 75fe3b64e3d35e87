//! Scale bar overlay structure.

use glam::Vec3;

use feaview_core::drawable::{Drawable, MeshVertex, RenderBatch};
use feaview_render::color_maps::ColorMap;

/// Vertical color gradient strips composing the bar.
const BAR_STRIPS: usize = 32;

/// A vertical color-map legend pinned to the right edge of its panel.
///
/// Emitted as screen-space overlay geometry in panel NDC, so it ignores the
/// camera entirely. The title names the scalar field the bar legends.
pub struct ScaleBar {
    title: String,
    color_map: ColorMap,
    vmin: f32,
    vmax: f32,
}

impl ScaleBar {
    /// Creates a scale bar for a field over `[vmin, vmax]`.
    #[must_use]
    pub fn new(title: impl Into<String>, color_map: ColorMap, vmin: f32, vmax: f32) -> Self {
        Self {
            title: title.into(),
            color_map,
            vmin,
            vmax,
        }
    }

    /// Returns the legend title (the field name).
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the legended value range.
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        (self.vmin, self.vmax)
    }
}

impl Drawable for ScaleBar {
    fn name(&self) -> &str {
        &self.title
    }

    fn type_name(&self) -> &'static str {
        "ScaleBar"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        // Screen-space only; never contributes to the scene extent
        None
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        let (x0, x1) = (0.86f32, 0.92f32);
        let (y0, y1) = (-0.6f32, 0.6f32);

        #[allow(clippy::cast_precision_loss)]
        for i in 0..BAR_STRIPS {
            let t_lo = i as f32 / BAR_STRIPS as f32;
            let t_hi = (i + 1) as f32 / BAR_STRIPS as f32;
            let ya = y0 + (y1 - y0) * t_lo;
            let yb = y0 + (y1 - y0) * t_hi;
            let c_lo = self.color_map.sample(t_lo);
            let c_hi = self.color_map.sample(t_hi);

            let quad = [
                ([x0, ya], c_lo),
                ([x1, ya], c_lo),
                ([x1, yb], c_hi),
                ([x0, ya], c_lo),
                ([x1, yb], c_hi),
                ([x0, yb], c_hi),
            ];
            for ([x, y], c) in quad {
                batch.overlay.push(MeshVertex {
                    position: [x, y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    color: [c.x, c.y, c.z, 1.0],
                    shade: 0.0,
                });
            }
        }
    }
}
