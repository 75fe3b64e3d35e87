//! feaview: a presentation layer for finite element models and results.
//!
//! Displays FEA parts as tetrahedral meshes with node markers, decorated by
//! boundary-condition glyphs, nodal result fields (color maps, displacement
//! arrows, isolines, isosurfaces), deformed shapes, and per-panel mode shape
//! frames, all in one multi-panel window.
//!
//! Solver backends implement the traits in [`model`] on their own types;
//! the viewer consumes them read-only:
//!
//! ```no_run
//! use feaview::{DisplayOptions, FieldDisplay, ModelViewer, ShowArgs};
//! # fn doc(model: &impl feaview::FeaModel, field: &impl feaview::NodeFieldResults) -> feaview::Result<()> {
//! let mut viewer = ModelViewer::new(model, DisplayOptions::default())?;
//! viewer.add_bcs();
//! viewer.add_node_field_results(field, &FieldDisplay {
//!     vectors: Some(1.0),
//!     isolines: Some(5),
//!     ..FieldDisplay::default()
//! })?;
//! viewer.show(ShowArgs::default())
//! # }
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
pub mod model;
pub mod model_viewer;
pub mod part_viewer;
pub mod viewer;

pub use feaview_core::{DisplayOptions, FeaViewError, Result};
pub use model::{
    Capability, FeaElement, FeaModel, FeaNode, FeaPart, FieldDisplay, Interface, ModeShape,
    NodeFieldResults, NodeOrdering, ShowArgs,
};
pub use model_viewer::ModelViewer;
pub use part_viewer::PartViewer;
pub use viewer::FeaViewer;

// Re-export the structure and math types callers interact with
pub use feaview_structures as structures;
pub use glam::{Mat4, Vec2, Vec3, Vec4};
