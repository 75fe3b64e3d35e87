//! Core abstractions for feaview-rs.
//!
//! This crate provides the GPU-independent foundation of the viewer:
//! - [`Drawable`] trait and CPU-side [`RenderBatch`] geometry
//! - The multi-panel [`Scene`]
//! - [`DisplayOptions`] shared display defaults
//! - Contour extraction algorithms ([`contours`])
//! - The [`FeaViewError`] taxonomy

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod contours;
pub mod drawable;
pub mod error;
pub mod options;
pub mod scene;

pub use contours::{IsolineLevel, IsosurfaceMesh};
pub use drawable::{Drawable, LineVertex, MeshVertex, RenderBatch};
pub use error::{FeaViewError, Result};
pub use options::DisplayOptions;
pub use scene::{Panel, Scene};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
