//! The base viewer: panel grid, display options, and window lifecycle.

use glam::Vec3;

use feaview_core::drawable::Drawable;
use feaview_core::error::Result;
use feaview_core::options::DisplayOptions;
use feaview_core::scene::Scene;
use feaview_render::color_maps::ColorMapRegistry;
use feaview_structures::{GroundGrid, IsolineSet, IsosurfaceShell, TetMesh};

use crate::app::FeaViewApp;

/// The base presentation window: a panel grid of drawables plus the styling
/// defaults every structure is created with.
///
/// [`crate::ModelViewer`] builds on this; the base viewer is also usable
/// directly for ad-hoc display of meshes and contours.
pub struct FeaViewer {
    scene: Scene,
    options: DisplayOptions,
    color_maps: ColorMapRegistry,
}

impl FeaViewer {
    /// Creates a viewer with the given options. The panel grid is fixed at
    /// construction from `options.panel_layout`.
    #[must_use]
    pub fn new(options: DisplayOptions) -> Self {
        let (rows, cols) = options.panel_layout;
        Self {
            scene: Scene::new(rows, cols),
            options,
            color_maps: ColorMapRegistry::new(),
        }
    }

    /// Returns the display options.
    #[must_use]
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Returns the scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the scene mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Returns the color map registry.
    #[must_use]
    pub fn color_maps(&self) -> &ColorMapRegistry {
        &self.color_maps
    }

    /// Adds drawables to a panel.
    ///
    /// Errors with [`feaview_core::FeaViewError::PanelOutOfRange`] past the
    /// configured grid.
    pub fn add_objects(&mut self, panel: usize, drawables: Vec<Box<dyn Drawable>>) -> Result<()> {
        let target = self.scene.panel_mut(panel)?;
        for drawable in drawables {
            target.add(drawable);
        }
        Ok(())
    }

    /// Applies a scalar field to a mesh through a color map.
    ///
    /// `cmap` of `None` uses the configured default. Empty `values` leave
    /// the mesh untouched and return `Ok`.
    pub fn add_cmap_to_mesh(
        &self,
        mesh: &mut TetMesh,
        field_name: &str,
        values: Vec<f32>,
        location: feaview_structures::QuantityLocation,
        cmap: Option<&str>,
    ) -> Result<()> {
        mesh.set_scalar_quantity(
            field_name,
            values,
            location,
            cmap.unwrap_or(&self.options.color_map),
            &self.color_maps,
        )
    }

    /// Traces `n` interior isolines of the mesh's active scalar field.
    pub fn add_isolines_to_mesh(&self, mesh: &TetMesh, n: usize) -> Result<IsolineSet> {
        let levels = mesh.isolines(n)?;
        Ok(IsolineSet::new(format!("{} isolines", mesh.name()), levels))
    }

    /// Extracts `n` isosurface shells of the mesh's active scalar field.
    pub fn add_isosurfaces_to_mesh(
        &self,
        mesh: &TetMesh,
        n: usize,
    ) -> Result<Vec<IsosurfaceShell>> {
        mesh.isosurfaces(n, &self.color_maps)
    }

    /// Enables the ground grid. Idempotent.
    pub fn add_grid(&mut self) {
        self.scene.add_grid();
    }

    /// Disables the ground grid. Idempotent.
    pub fn remove_grid(&mut self) {
        self.scene.remove_grid();
    }

    /// Opens the window and blocks until it is closed.
    ///
    /// Collects every panel into CPU geometry batches, appends the ground
    /// grid when enabled, and hands off to the windowed event loop. The
    /// camera frames the scene bounding box unless an explicit position is
    /// given; the up direction is always +Z.
    pub fn show(&mut self, camera_position: Option<Vec3>) -> Result<()> {
        let _ = env_logger::try_init();

        let bounds = self.scene.bounding_box();
        let length_scale = self.scene.length_scale();
        let grid = self.scene.grid_enabled().then(|| GroundGrid::fitted(bounds.0, bounds.1));

        let batches: Vec<_> = self
            .scene
            .panels()
            .iter()
            .map(|panel| {
                let mut batch = panel.collect(length_scale);
                if let Some(ref grid) = grid {
                    if !panel.is_empty() {
                        grid.collect(&mut batch, length_scale);
                    }
                }
                batch
            })
            .collect();

        log::info!(
            "showing {} panels, {} drawables, length scale {length_scale:.3}",
            self.scene.panels().len(),
            self.scene.len()
        );

        let mut app = FeaViewApp::new(&self.options, batches, bounds, camera_position);
        app.run()
    }
}

impl Default for FeaViewer {
    fn default() -> Self {
        Self::new(DisplayOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feaview_core::FeaViewError;
    use feaview_structures::QuantityLocation;

    fn unit_tet() -> TetMesh {
        TetMesh::new(
            "tet",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![[0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_panel_grid_from_options() {
        let viewer = FeaViewer::default();
        assert_eq!(viewer.scene().layout(), (2, 2));
        assert_eq!(viewer.scene().panels().len(), 4);
    }

    #[test]
    fn test_add_objects_rejects_bad_panel() {
        let mut viewer = FeaViewer::default();
        let err = viewer.add_objects(9, vec![]).unwrap_err();
        assert!(matches!(err, FeaViewError::PanelOutOfRange { .. }));
    }

    #[test]
    fn test_default_cmap_substitution() {
        let viewer = FeaViewer::default();
        let mut mesh = unit_tet();
        viewer
            .add_cmap_to_mesh(
                &mut mesh,
                "u",
                vec![0.0, 1.0, 2.0, 3.0],
                QuantityLocation::Point,
                None,
            )
            .unwrap();
        // No explicit map requested: the configured default applies
        assert_eq!(mesh.active_color_map(), Some("jet"));
    }

    #[test]
    fn test_empty_values_leave_mesh_unchanged() {
        let viewer = FeaViewer::default();
        let mut mesh = unit_tet();
        viewer
            .add_cmap_to_mesh(&mut mesh, "u", vec![], QuantityLocation::Point, None)
            .unwrap();
        assert!(mesh.active_scalar_field().is_none());
    }

    #[test]
    fn test_isolines_need_a_field_first() {
        let viewer = FeaViewer::default();
        let mesh = unit_tet();
        assert!(matches!(
            viewer.add_isolines_to_mesh(&mesh, 3).unwrap_err(),
            FeaViewError::NoActiveScalarField(_)
        ));
    }
}
