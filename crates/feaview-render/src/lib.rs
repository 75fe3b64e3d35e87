//! Rendering backend for feaview.
//!
//! Provides the wgpu [`engine::RenderEngine`] that draws a multi-panel scene
//! into one window, the Z-up turntable [`camera::Camera`], and the
//! [`color_maps::ColorMapRegistry`] used to map scalar fields to colors.
//! Color maps are pure CPU code and usable without a GPU device.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod color_maps;
pub mod engine;
pub mod error;

pub use camera::Camera;
pub use color_maps::{ColorMap, ColorMapRegistry};
pub use engine::{CameraUniforms, RenderEngine};
pub use error::{RenderError, RenderResult};
