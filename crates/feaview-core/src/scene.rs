//! Multi-panel scene holding drawables for display.

use std::fmt;

use glam::Vec3;

use crate::drawable::{Drawable, RenderBatch};
use crate::error::{FeaViewError, Result};

/// One panel of the scene grid: an ordered list of drawables.
#[derive(Default)]
pub struct Panel {
    drawables: Vec<Box<dyn Drawable>>,
}

impl Panel {
    /// Adds a drawable to this panel.
    pub fn add(&mut self, drawable: Box<dyn Drawable>) {
        self.drawables.push(drawable);
    }

    /// Returns the drawables in this panel.
    #[must_use]
    pub fn drawables(&self) -> &[Box<dyn Drawable>] {
        &self.drawables
    }

    /// Returns the number of drawables in this panel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Returns true if this panel holds no drawables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Collects the geometry of all enabled drawables in this panel.
    #[must_use]
    pub fn collect(&self, length_scale: f32) -> RenderBatch {
        let mut batch = RenderBatch::default();
        for drawable in &self.drawables {
            if drawable.is_enabled() {
                drawable.collect(&mut batch, length_scale);
            }
        }
        batch
    }
}

// Drawables are trait objects; report their count only.
impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("drawables", &self.drawables.len())
            .finish()
    }
}

/// The rendering surface: a fixed grid of panels plus a shared ground grid.
///
/// Panel 0 is the main panel; broadcast operations add there. Mode-shape
/// frames use panels 1 and up. The grid layout is fixed at construction.
pub struct Scene {
    panels: Vec<Panel>,
    layout: (usize, usize),
    grid_enabled: bool,
}

impl Scene {
    /// Creates a scene with a `rows x cols` panel grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let count = (rows * cols).max(1);
        Self {
            panels: (0..count).map(|_| Panel::default()).collect(),
            layout: (rows.max(1), cols.max(1)),
            grid_enabled: false,
        }
    }

    /// Returns the panel grid layout (rows, cols).
    #[must_use]
    pub fn layout(&self) -> (usize, usize) {
        self.layout
    }

    /// Returns the panels.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Returns a mutable reference to panel `index`.
    ///
    /// Errors with [`FeaViewError::PanelOutOfRange`] past the configured grid.
    pub fn panel_mut(&mut self, index: usize) -> Result<&mut Panel> {
        let panels = self.panels.len();
        self.panels
            .get_mut(index)
            .ok_or(FeaViewError::PanelOutOfRange { index, panels })
    }

    /// Adds a drawable to the main panel.
    pub fn add(&mut self, drawable: Box<dyn Drawable>) {
        self.panels[0].add(drawable);
    }

    /// Enables the shared ground grid. Idempotent: enabling an already
    /// enabled grid keeps the same grid rather than rebuilding anything.
    pub fn add_grid(&mut self) {
        self.grid_enabled = true;
    }

    /// Disables the shared ground grid. Idempotent.
    pub fn remove_grid(&mut self) {
        self.grid_enabled = false;
    }

    /// Returns whether the ground grid is enabled.
    #[must_use]
    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    /// Returns the total number of drawables across all panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.iter().map(Panel::len).sum()
    }

    /// Returns true if no panel holds any drawable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.iter().all(Panel::is_empty)
    }

    /// Computes the axis-aligned bounding box over all drawables.
    ///
    /// Falls back to a unit box when nothing has spatial extent.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut has_extent = false;

        for panel in &self.panels {
            for drawable in panel.drawables() {
                if let Some((bb_min, bb_max)) = drawable.bounding_box() {
                    min = min.min(bb_min);
                    max = max.max(bb_max);
                    has_extent = true;
                }
            }
        }

        if has_extent {
            (min, max)
        } else {
            (Vec3::ZERO, Vec3::ONE)
        }
    }

    /// Representative length scale: the bounding-box diagonal.
    #[must_use]
    pub fn length_scale(&self) -> f32 {
        let (min, max) = self.bounding_box();
        (max - min).length().max(f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot(Vec3);

    impl Drawable for Dot {
        fn name(&self) -> &str {
            "dot"
        }
        fn type_name(&self) -> &'static str {
            "Dot"
        }
        fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
            Some((self.0, self.0))
        }
        fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
            batch.push_line(self.0, self.0, [0.0; 4]);
        }
    }

    #[test]
    fn test_panel_out_of_range() {
        let mut scene = Scene::new(2, 2);
        assert!(scene.panel_mut(3).is_ok());
        let err = scene.panel_mut(4).unwrap_err();
        assert!(matches!(
            err,
            FeaViewError::PanelOutOfRange { index: 4, panels: 4 }
        ));
    }

    #[test]
    fn test_bounding_box_aggregation() {
        let mut scene = Scene::new(1, 1);
        assert_eq!(scene.bounding_box(), (Vec3::ZERO, Vec3::ONE));

        scene.add(Box::new(Dot(Vec3::new(-2.0, 0.0, 0.0))));
        scene.add(Box::new(Dot(Vec3::new(1.0, 3.0, 0.0))));
        let (min, max) = scene.bounding_box();
        assert_eq!(min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(max, Vec3::new(1.0, 3.0, 0.0));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_grid_toggle_idempotent() {
        let mut scene = Scene::new(1, 1);
        assert!(!scene.grid_enabled());
        scene.add_grid();
        scene.add_grid();
        assert!(scene.grid_enabled());
        scene.remove_grid();
        scene.remove_grid();
        assert!(!scene.grid_enabled());
    }
}
