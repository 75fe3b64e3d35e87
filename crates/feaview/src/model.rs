//! Model-side traits the viewer consumes.
//!
//! The viewer never owns analysis data. Solver backends implement these
//! traits on their own model types; the viewer reads nodes, elements, and
//! result fields through them and builds display geometry.

use glam::Vec3;

/// One node of a finite element part.
pub trait FeaNode {
    /// Stable node key, unique within the model.
    fn key(&self) -> usize;

    /// Part-local node key. Defaults to the model-wide key for domains
    /// that do not renumber per part.
    fn part_key(&self) -> usize {
        self.key()
    }

    /// Undeformed position.
    fn position(&self) -> Vec3;

    /// Displacement vector at a named analysis step, if results exist.
    fn displacement_at(&self, step: &str) -> Option<Vec3>;
}

/// One element of a finite element part.
pub trait FeaElement {
    /// Stable element key, unique within the part.
    fn key(&self) -> usize;

    /// Connectivity as node keys. The viewer only displays tetrahedra;
    /// other lengths are rejected during mesh construction.
    fn node_keys(&self) -> Vec<usize>;
}

/// One part of a model: a node set plus element connectivity.
pub trait FeaPart {
    type Node: FeaNode;
    type Element: FeaElement;

    /// Part name, used for display labels.
    fn name(&self) -> &str;

    /// All nodes of the part, in the part's own order.
    fn nodes(&self) -> Vec<&Self::Node>;

    /// All elements of the part.
    fn elements(&self) -> Vec<&Self::Element>;
}

/// A complete model: named parts plus boundary conditions.
pub trait FeaModel {
    type Part: FeaPart;

    /// Model name, used as the window title suffix.
    fn name(&self) -> &str;

    /// All parts of the model.
    fn parts(&self) -> Vec<&Self::Part>;

    /// Boundary conditions as (name, constrained node positions) pairs.
    fn boundary_conditions(&self) -> Vec<(String, Vec<Vec3>)> {
        Vec::new()
    }
}

/// A nodal vector result field from one analysis step.
pub trait NodeFieldResults {
    /// Field name, shown as the scale bar title.
    fn field_name(&self) -> &str;

    /// Result vector at a node key. `None` means the node has no value;
    /// it is treated as zero.
    fn vector_at(&self, node_key: usize) -> Option<Vec3>;
}

/// One mode shape from a modal analysis.
///
/// Entries are plain displacement vectors per node key. Scaling to visual
/// amplitude is the viewer's job.
pub trait ModeShape {
    /// Label for the panel showing this mode (e.g. "mode 1, f = 12.4 Hz").
    fn label(&self) -> String;

    /// Modal displacement vector at a node key.
    fn displacement_at(&self, node_key: usize) -> Option<Vec3>;
}

/// An interface surface between two parts, as an ordered point loop.
pub trait Interface {
    /// Interface name.
    fn name(&self) -> &str;

    /// The boundary points of the interface polygon.
    fn points(&self) -> Vec<Vec3>;
}

/// Which node order the part mesh vertices follow.
///
/// Field results arrive keyed by node, so any consistent order produces the
/// same picture; the choice only fixes the vertex numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeOrdering {
    /// Sort nodes by their model-wide key.
    #[default]
    Global,
    /// Sort nodes by their part-local key.
    PartLocal,
}

/// Declared viewer capabilities, checked via [`crate::ModelViewer::supports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Nodal vector fields with color maps, arrows, and contours.
    NodeFields,
    /// Stress tensor fields. Declared but not implemented.
    StressFields,
    /// Deformed shapes from displacement results.
    DeformedShapes,
    /// Mode shape frames on extra panels.
    ModeShapes,
}

/// Display options for one nodal field.
#[derive(Debug, Clone, Default)]
pub struct FieldDisplay {
    /// Draw displacement arrows scaled by this factor. `None` or `0.0`
    /// leaves arrows off.
    pub vectors: Option<f32>,
    /// Color map name; `None` falls back to the viewer's configured default.
    pub cmap: Option<String>,
    /// Number of interior isoline levels to trace.
    pub isolines: Option<usize>,
    /// Number of isosurface shells to extract.
    pub isosurfaces: Option<usize>,
}

/// Arguments for [`crate::ModelViewer::show`].
#[derive(Debug, Clone)]
pub struct ShowArgs {
    /// Explicit camera position; `None` frames the scene automatically.
    pub camera_position: Option<Vec3>,
    /// Include boundary-condition glyphs.
    pub show_bcs: bool,
    /// Include part meshes and node markers.
    pub show_parts: bool,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            camera_position: None,
            show_bcs: true,
            show_parts: true,
        }
    }
}
