//! Whole-model display orchestration.

use std::fmt;

use feaview_core::drawable::Drawable;
use feaview_core::error::{FeaViewError, Result};
use feaview_core::options::DisplayOptions;
use feaview_structures::{ConeGlyphs, PolygonPatch, TetMesh};

use crate::model::{
    Capability, FeaModel, FieldDisplay, Interface, ModeShape, NodeFieldResults, NodeOrdering,
    ShowArgs,
};
use crate::part_viewer::PartViewer;
use crate::viewer::FeaViewer;

/// Viewer for a complete model: every part plus boundary conditions, result
/// fields, deformed shapes, mode shape frames, and interface patches.
///
/// Everything accumulates on the main panel except mode shapes, which take
/// one extra panel each. `show` assembles the scene and blocks until the
/// window closes.
pub struct ModelViewer<'m, M: FeaModel> {
    model: &'m M,
    viewer: FeaViewer,
    ordering: NodeOrdering,
    parts: Vec<PartViewer>,
    bcs: Vec<ConeGlyphs>,
    interfaces: Vec<PolygonPatch>,
    skipped_interfaces: usize,
    deformed: Vec<TetMesh>,
    mode_frames: Vec<(String, Vec<TetMesh>)>,
}

// The scene holds trait objects; report the model name and counts only.
impl<M: FeaModel> fmt::Debug for ModelViewer<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelViewer")
            .field("model", &self.model.name())
            .field("parts", &self.parts.len())
            .field("bcs", &self.bcs.len())
            .field("interfaces", &self.interfaces.len())
            .field("deformed", &self.deformed.len())
            .field("mode_frames", &self.mode_frames.len())
            .finish()
    }
}

impl<'m, M: FeaModel> ModelViewer<'m, M> {
    /// Creates a viewer for a model, building display state for every part.
    pub fn new(model: &'m M, options: DisplayOptions) -> Result<Self> {
        Self::with_ordering(model, options, NodeOrdering::default())
    }

    /// Like [`ModelViewer::new`] with an explicit node ordering.
    pub fn with_ordering(
        model: &'m M,
        options: DisplayOptions,
        ordering: NodeOrdering,
    ) -> Result<Self> {
        let mut this = Self {
            model,
            viewer: FeaViewer::new(options),
            ordering,
            parts: Vec::new(),
            bcs: Vec::new(),
            interfaces: Vec::new(),
            skipped_interfaces: 0,
            deformed: Vec::new(),
            mode_frames: Vec::new(),
        };
        for part in model.parts() {
            this.add_part(part)?;
        }
        Ok(this)
    }

    /// Adds one part: it is tracked first, so later broadcast operations
    /// reach it, and its geometry lands on the main panel at assembly.
    pub fn add_part(&mut self, part: &M::Part) -> Result<()> {
        let part_viewer = PartViewer::from_part(part, self.ordering, self.viewer.options())?;
        self.parts.push(part_viewer);
        Ok(())
    }

    /// Returns the tracked part viewers.
    #[must_use]
    pub fn parts(&self) -> &[PartViewer] {
        &self.parts
    }

    /// Returns the number of interfaces skipped as degenerate.
    #[must_use]
    pub fn skipped_interfaces(&self) -> usize {
        self.skipped_interfaces
    }

    /// Returns whether a capability is actually implemented.
    #[must_use]
    pub fn supports(capability: Capability) -> bool {
        !matches!(capability, Capability::StressFields)
    }

    /// Adds boundary-condition cones: one glyph set per condition, one cone
    /// per constrained node, tip at the node.
    pub fn add_bcs(&mut self) {
        for (name, positions) in self.model.boundary_conditions() {
            if positions.is_empty() {
                continue;
            }
            self.bcs.push(ConeGlyphs::new(name, positions));
        }
    }

    /// Applies a nodal result field to every tracked part.
    pub fn add_node_field_results<F: NodeFieldResults>(
        &mut self,
        field: &F,
        display: &FieldDisplay,
    ) -> Result<()> {
        for part in &mut self.parts {
            part.add_node_field_results(
                field,
                display,
                self.viewer.options(),
                self.viewer.color_maps(),
            )?;
        }
        Ok(())
    }

    /// Stress tensor fields are declared but not implemented; always errors
    /// with [`FeaViewError::UnsupportedCapability`].
    pub fn add_stress_field_results(&mut self, _field_name: &str) -> Result<()> {
        Err(FeaViewError::UnsupportedCapability("stress fields"))
    }

    /// Adds the model's deformed shape at one analysis step, displacements
    /// scaled by `scale`. The undeformed meshes stay visible underneath.
    pub fn add_deformed_shape(&mut self, step: &str, scale: f32) -> Result<()> {
        for (part_viewer, part) in self.parts.iter().zip(self.model.parts()) {
            self.deformed.push(part_viewer.deformed_mesh(part, step, scale)?);
        }
        Ok(())
    }

    /// Adds mode shape frames, one panel per mode, panels 1 and up.
    ///
    /// Errors with [`FeaViewError::PanelOutOfRange`] when there are more
    /// modes than spare panels.
    pub fn add_mode_shapes<S: ModeShape>(&mut self, shapes: &[S], scale: f32) -> Result<()> {
        let panels = self.viewer.scene().panels().len();
        for i in 0..shapes.len() {
            let panel = 1 + self.mode_frames.len() + i;
            if panel >= panels {
                return Err(FeaViewError::PanelOutOfRange {
                    index: panel,
                    panels,
                });
            }
        }
        for shape in shapes {
            let mut meshes = Vec::with_capacity(self.parts.len());
            for part_viewer in &self.parts {
                let mut mesh = part_viewer.mode_shape_mesh(shape, scale);
                // Color each frame by its scaled modal amplitude
                mesh.set_scalar_quantity(
                    shape.label(),
                    part_viewer.mode_shape_magnitudes(shape, scale),
                    feaview_structures::QuantityLocation::Point,
                    &self.viewer.options().color_map,
                    self.viewer.color_maps(),
                )?;
                meshes.push(mesh);
            }
            self.mode_frames.push((shape.label(), meshes));
        }
        Ok(())
    }

    /// Adds interface patches between parts. Loops with fewer than 3 points
    /// cannot form a surface and are skipped; the count is logged.
    pub fn add_interfaces<I: Interface>(&mut self, interfaces: &[I]) {
        let mut skipped = 0;
        for interface in interfaces {
            let points = interface.points();
            if points.len() < 3 {
                skipped += 1;
                continue;
            }
            self.interfaces
                .push(PolygonPatch::new(interface.name(), points));
        }
        if skipped > 0 {
            log::info!(
                "skipped {skipped} degenerate interface(s) with fewer than 3 points"
            );
        }
        self.skipped_interfaces += skipped;
    }

    /// Enables the ground grid. Idempotent.
    pub fn add_grid(&mut self) {
        self.viewer.add_grid();
    }

    /// Disables the ground grid. Idempotent.
    pub fn remove_grid(&mut self) {
        self.viewer.remove_grid();
    }

    /// Assembles everything into the base viewer with default arguments.
    pub fn into_viewer(self) -> Result<FeaViewer> {
        self.into_viewer_with(&ShowArgs::default())
    }

    /// Assembles everything into the base viewer: part geometry, boundary
    /// conditions, deformed shapes, and interfaces on the main panel; mode
    /// shape frames on panels 1 and up. `args` toggles whole categories:
    /// `show_parts` covers the part meshes, their deformed shapes and the
    /// mode frames, `show_bcs` the boundary condition glyphs.
    pub fn into_viewer_with(self, args: &ShowArgs) -> Result<FeaViewer> {
        let mut viewer = self.viewer;

        let mut main: Vec<Box<dyn Drawable>> = Vec::new();
        if args.show_parts {
            for part in self.parts {
                main.extend(part.into_drawables());
            }
            for mesh in self.deformed {
                main.push(Box::new(mesh));
            }
        }
        if args.show_bcs {
            for glyphs in self.bcs {
                main.push(Box::new(glyphs));
            }
        }
        for patch in self.interfaces {
            main.push(Box::new(patch));
        }
        viewer.add_objects(0, main)?;

        if args.show_parts {
            for (i, (label, meshes)) in self.mode_frames.into_iter().enumerate() {
                log::debug!("mode frame '{label}' on panel {}", i + 1);
                let drawables = meshes
                    .into_iter()
                    .map(|mesh| Box::new(mesh) as Box<dyn Drawable>)
                    .collect();
                viewer.add_objects(1 + i, drawables)?;
            }
        }

        Ok(viewer)
    }

    /// Opens the window and blocks until it is closed.
    pub fn show(self, args: ShowArgs) -> Result<()> {
        let camera_position = args.camera_position;
        let mut viewer = self.into_viewer_with(&args)?;
        viewer.show(camera_position)
    }
}
