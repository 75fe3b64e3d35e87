//! Error types for feaview-rs.

use thiserror::Error;

/// The main error type for feaview-rs operations.
#[derive(Error, Debug)]
pub enum FeaViewError {
    /// A requested capability is declared but not implemented.
    #[error("capability '{0}' is not supported by this viewer")]
    UnsupportedCapability(&'static str),

    /// A panel index is outside the configured panel grid.
    #[error("panel {index} out of range: scene has {panels} panels")]
    PanelOutOfRange { index: usize, panels: usize },

    /// Element connectivity referenced a node key that is not part of the
    /// sorted node list the mesh vertices were built from.
    #[error("element connectivity references unknown node key {0}")]
    UnknownNodeKey(usize),

    /// An element does not have tetrahedral connectivity.
    #[error("element has {0} nodes, expected 4 (tetrahedron)")]
    NonTetElement(usize),

    /// Isoline/isosurface extraction was requested before a scalar field
    /// was applied to the mesh.
    #[error("mesh '{0}' has no active scalar field")]
    NoActiveScalarField(String),

    /// A color map with the given name is not registered.
    #[error("unknown color map '{0}'")]
    UnknownColorMap(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for feaview-rs operations.
pub type Result<T> = std::result::Result<T, FeaViewError>;
