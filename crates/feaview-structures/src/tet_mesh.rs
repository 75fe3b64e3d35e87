//! Tetrahedral mesh structure.
//!
//! The display form of one FEA part: vertices plus tetrahedral cells. Only
//! the exterior boundary faces are rendered; interior faces shared by two
//! cells are detected by occurrence counting and skipped. Scalar fields can
//! be applied per point or per cell and drive vertex colors, isolines, and
//! isosurface shells.

use std::collections::HashMap;

use glam::Vec3;

use feaview_core::contours::{
    extract_isolines, extract_isosurface, isosurface_levels, scalar_range, IsolineLevel,
};
use feaview_core::drawable::{points_bounding_box, Drawable, RenderBatch};
use feaview_core::error::{FeaViewError, Result};
use feaview_render::color_maps::ColorMapRegistry;

use crate::isosurface::IsosurfaceShell;

/// Where the values of a scalar quantity live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityLocation {
    /// One value per mesh vertex.
    Point,
    /// One value per tetrahedral cell.
    Cell,
}

/// A named scalar field attached to a mesh.
#[derive(Debug, Clone)]
pub struct ScalarQuantity {
    /// Field name, shown as the scale bar title.
    pub name: String,
    /// Raw values, one per point or per cell.
    pub values: Vec<f32>,
    /// Value location.
    pub location: QuantityLocation,
}

/// Faces of one tetrahedron, as local corner indices.
const TET_FACE_STENCIL: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]];

/// A tetrahedral mesh with optional scalar coloring.
pub struct TetMesh {
    name: String,
    vertices: Vec<Vec3>,
    cells: Vec<[u32; 4]>,
    boundary_faces: Vec<[u32; 3]>,
    color: Vec3,
    alpha: f32,
    enabled: bool,
    scalar: Option<ScalarQuantity>,
    color_map: String,
    /// Scalars resampled onto vertices (cell fields are averaged).
    vertex_scalars: Option<Vec<f32>>,
    /// Vertex colors from the active scalar field.
    vertex_colors: Option<Vec<Vec3>>,
}

impl TetMesh {
    /// Creates a tetrahedral mesh and extracts its boundary surface.
    #[must_use]
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, cells: Vec<[u32; 4]>) -> Self {
        let name = name.into();
        let boundary_faces = compute_boundary_faces(&cells);
        log::debug!(
            "tet mesh '{}': {} vertices, {} cells, {} boundary faces",
            name,
            vertices.len(),
            cells.len(),
            boundary_faces.len()
        );
        Self {
            name: name.into(),
            vertices,
            cells,
            boundary_faces,
            color: Vec3::new(0.68, 0.85, 0.90),
            alpha: 0.8,
            enabled: true,
            scalar: None,
            color_map: String::new(),
            vertex_scalars: None,
            vertex_colors: None,
        }
    }

    /// Sets the base surface color.
    pub fn set_color(&mut self, color: Vec3) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the surface opacity.
    pub fn set_alpha(&mut self, alpha: f32) -> &mut Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Sets visibility.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Returns the mesh vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns the tetrahedral cells.
    #[must_use]
    pub fn cells(&self) -> &[[u32; 4]] {
        &self.cells
    }

    /// Returns the exterior boundary faces.
    #[must_use]
    pub fn boundary_faces(&self) -> &[[u32; 3]] {
        &self.boundary_faces
    }

    /// Returns the boundary surface: vertices, exterior faces, and the
    /// per-vertex scalars of the active field when one is applied.
    #[must_use]
    pub fn boundary_surface(&self) -> (&[Vec3], &[[u32; 3]], Option<&[f32]>) {
        (
            &self.vertices,
            &self.boundary_faces,
            self.vertex_scalars.as_deref(),
        )
    }

    /// Returns the active field resampled onto vertices, if any.
    #[must_use]
    pub fn vertex_scalars(&self) -> Option<&[f32]> {
        self.vertex_scalars.as_deref()
    }

    /// Returns the name of the active scalar field, if any.
    #[must_use]
    pub fn active_scalar_field(&self) -> Option<&str> {
        self.scalar.as_ref().map(|q| q.name.as_str())
    }

    /// Returns the (min, max) range of the active scalar field.
    #[must_use]
    pub fn scalar_field_range(&self) -> Option<(f32, f32)> {
        scalar_range(self.vertex_scalars.as_deref()?)
    }

    /// Returns the name of the active color map.
    #[must_use]
    pub fn active_color_map(&self) -> Option<&str> {
        self.scalar.as_ref().map(|_| self.color_map.as_str())
    }

    /// Applies a scalar field with the given color map.
    ///
    /// An empty value list leaves the mesh untouched: no field, no recolor,
    /// no error. Otherwise the value count must match the location (one per
    /// vertex or one per cell), and the color map must be registered. Cell
    /// values are averaged onto vertices for coloring and contouring.
    pub fn set_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f32>,
        location: QuantityLocation,
        color_map: &str,
        registry: &ColorMapRegistry,
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let expected = match location {
            QuantityLocation::Point => self.vertices.len(),
            QuantityLocation::Cell => self.cells.len(),
        };
        if values.len() != expected {
            return Err(FeaViewError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }

        let cmap = registry
            .get(color_map)
            .ok_or_else(|| FeaViewError::UnknownColorMap(color_map.to_string()))?;

        let vertex_scalars = match location {
            QuantityLocation::Point => values.clone(),
            QuantityLocation::Cell => self.average_cells_to_vertices(&values),
        };

        let (vmin, vmax) = scalar_range(&vertex_scalars).unwrap_or((0.0, 1.0));
        let vertex_colors = vertex_scalars
            .iter()
            .map(|&v| cmap.sample_range(v, vmin, vmax))
            .collect();

        self.scalar = Some(ScalarQuantity {
            name: name.into(),
            values,
            location,
        });
        self.color_map = color_map.to_string();
        self.vertex_scalars = Some(vertex_scalars);
        self.vertex_colors = Some(vertex_colors);

        Ok(())
    }

    /// Removes the active scalar field, restoring the base surface color.
    pub fn clear_scalar_quantity(&mut self) {
        self.scalar = None;
        self.color_map.clear();
        self.vertex_scalars = None;
        self.vertex_colors = None;
    }

    /// Averages per-cell values onto the vertices.
    fn average_cells_to_vertices(&self, cell_values: &[f32]) -> Vec<f32> {
        let mut sums = vec![0.0f32; self.vertices.len()];
        let mut counts = vec![0u32; self.vertices.len()];
        for (cell, &value) in self.cells.iter().zip(cell_values) {
            for &v in cell {
                sums[v as usize] += value;
                counts[v as usize] += 1;
            }
        }
        sums.iter()
            .zip(&counts)
            .map(|(&s, &c)| if c == 0 { 0.0 } else { s / c as f32 })
            .collect()
    }

    /// Extracts `n` interior isoline levels of the active scalar field over
    /// the boundary surface.
    ///
    /// Errors with [`FeaViewError::NoActiveScalarField`] when no field has
    /// been applied.
    pub fn isolines(&self, n: usize) -> Result<Vec<IsolineLevel>> {
        let scalars = self
            .vertex_scalars
            .as_deref()
            .ok_or_else(|| FeaViewError::NoActiveScalarField(self.name.clone()))?;
        Ok(extract_isolines(
            &self.vertices,
            &self.boundary_faces,
            scalars,
            n,
        ))
    }

    /// Extracts `n` isosurface shells of the active scalar field, colored by
    /// the active color map at each level value.
    ///
    /// Errors with [`FeaViewError::NoActiveScalarField`] when no field has
    /// been applied.
    pub fn isosurfaces(&self, n: usize, registry: &ColorMapRegistry) -> Result<Vec<IsosurfaceShell>> {
        let scalars = self
            .vertex_scalars
            .as_deref()
            .ok_or_else(|| FeaViewError::NoActiveScalarField(self.name.clone()))?;
        let cmap = registry
            .get(&self.color_map)
            .ok_or_else(|| FeaViewError::UnknownColorMap(self.color_map.clone()))?;

        let (vmin, vmax) = scalar_range(scalars).unwrap_or((0.0, 1.0));

        Ok(isosurface_levels(scalars, n)
            .into_iter()
            .enumerate()
            .map(|(i, level)| {
                let mesh = extract_isosurface(&self.vertices, &self.cells, scalars, level);
                IsosurfaceShell::new(
                    format!("{} iso {i}", self.name),
                    mesh,
                    cmap.sample_range(level, vmin, vmax),
                )
            })
            .collect())
    }
}

impl Drawable for TetMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "TetMesh"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        points_bounding_box(&self.vertices)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn collect(&self, batch: &mut RenderBatch, _length_scale: f32) {
        for face in &self.boundary_faces {
            let mut colors = [self.color; 3];
            if let Some(ref vertex_colors) = self.vertex_colors {
                for (slot, &v) in colors.iter_mut().zip(face) {
                    *slot = vertex_colors[v as usize];
                }
            }
            let positions = [
                self.vertices[face[0] as usize],
                self.vertices[face[1] as usize],
                self.vertices[face[2] as usize],
            ];
            let normal = (positions[1] - positions[0])
                .cross(positions[2] - positions[0])
                .normalize_or_zero();
            for (p, c) in positions.iter().zip(&colors) {
                batch.triangles.push(feaview_core::drawable::MeshVertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                    color: [c.x, c.y, c.z, self.alpha],
                    shade: 1.0,
                });
            }
        }
    }
}

/// Order-independent key for one triangular face.
fn canonical_face_key(a: u32, b: u32, c: u32) -> [u32; 3] {
    let mut key = [a, b, c];
    key.sort_unstable();
    key
}

/// Faces appearing in exactly one cell form the boundary surface.
fn compute_boundary_faces(cells: &[[u32; 4]]) -> Vec<[u32; 3]> {
    let mut face_counts: HashMap<[u32; 3], [u32; 3]> = HashMap::new();
    let mut seen_twice: HashMap<[u32; 3], usize> = HashMap::new();

    for cell in cells {
        for [a, b, c] in TET_FACE_STENCIL {
            let face = [cell[a], cell[b], cell[c]];
            let key = canonical_face_key(face[0], face[1], face[2]);
            *seen_twice.entry(key).or_insert(0) += 1;
            face_counts.entry(key).or_insert(face);
        }
    }

    let mut boundary: Vec<[u32; 3]> = face_counts
        .into_iter()
        .filter(|(key, _)| seen_twice[key] == 1)
        .map(|(_, face)| face)
        .collect();
    // Deterministic output order for tests and rendering
    boundary.sort_unstable();
    boundary
}
