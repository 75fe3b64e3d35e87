//! Structure implementations for feaview.
//!
//! Everything that can be placed in a scene panel lives here: tetrahedral
//! part meshes, node markers, boundary-condition cones, displacement arrows,
//! isoline curves, isosurface shells, interface patches, scale bars, and the
//! ground grid. All structures build their geometry CPU-side through the
//! [`feaview_core::Drawable`] trait, so they are fully testable without a
//! GPU device.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod curves;
pub mod glyphs;
pub mod grid;
pub mod isosurface;
pub mod point_cloud;
pub mod polygon;
pub mod scale_bar;
pub mod tet_mesh;

pub use curves::IsolineSet;
pub use glyphs::{ArrowField, ConeGlyphs, BC_CONE_HEIGHT};
pub use grid::GroundGrid;
pub use isosurface::IsosurfaceShell;
pub use point_cloud::PointCloud;
pub use polygon::PolygonPatch;
pub use scale_bar::ScaleBar;
pub use tet_mesh::{QuantityLocation, ScalarQuantity, TetMesh};
