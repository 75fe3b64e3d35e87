//! Per-part display state.

use std::collections::HashMap;

use glam::Vec3;

use feaview_core::drawable::Drawable;
use feaview_core::error::{FeaViewError, Result};
use feaview_core::options::DisplayOptions;
use feaview_render::color_maps::ColorMapRegistry;
use feaview_structures::{ArrowField, IsolineSet, IsosurfaceShell, PointCloud, ScaleBar, TetMesh};

use crate::model::{FeaElement, FeaNode, FeaPart, FieldDisplay, NodeFieldResults, NodeOrdering};

/// Display state of one part: its tetrahedral mesh, node markers, and
/// whatever field decoration has been applied.
///
/// Vertices follow the configured [`NodeOrdering`]; element connectivity is
/// remapped from node keys to vertex indices through that same order, so the
/// rendered mesh is independent of how the part happens to enumerate nodes.
pub struct PartViewer {
    name: String,
    /// Node keys in vertex order.
    keys: Vec<usize>,
    positions: Vec<Vec3>,
    cells: Vec<[u32; 4]>,
    mesh: TetMesh,
    markers: PointCloud,
    arrows: Option<ArrowField>,
    isolines: Option<IsolineSet>,
    isosurfaces: Vec<IsosurfaceShell>,
    scale_bar: Option<ScaleBar>,
}

impl PartViewer {
    /// Builds the display state for one part.
    ///
    /// Errors with [`FeaViewError::NonTetElement`] on non-tetrahedral
    /// connectivity and [`FeaViewError::UnknownNodeKey`] when an element
    /// references a node the part does not contain.
    pub fn from_part<P: FeaPart>(
        part: &P,
        ordering: NodeOrdering,
        options: &DisplayOptions,
    ) -> Result<Self> {
        let mut nodes = part.nodes();
        match ordering {
            NodeOrdering::Global => nodes.sort_by_key(|n| n.key()),
            NodeOrdering::PartLocal => nodes.sort_by_key(|n| n.part_key()),
        }

        let keys: Vec<usize> = nodes.iter().map(|n| n.key()).collect();
        let positions: Vec<Vec3> = nodes.iter().map(|n| n.position()).collect();
        let node_index: HashMap<usize, u32> = keys
            .iter()
            .enumerate()
            .map(|(i, &k)| (k, u32::try_from(i).unwrap_or(u32::MAX)))
            .collect();

        let mut cells = Vec::new();
        for element in part.elements() {
            let node_keys = element.node_keys();
            if node_keys.len() != 4 {
                return Err(FeaViewError::NonTetElement(node_keys.len()));
            }
            let mut cell = [0u32; 4];
            for (slot, key) in cell.iter_mut().zip(&node_keys) {
                *slot = *node_index
                    .get(key)
                    .ok_or(FeaViewError::UnknownNodeKey(*key))?;
            }
            cells.push(cell);
        }

        let mut mesh = TetMesh::new(part.name(), positions.clone(), cells.clone());
        mesh.set_color(options.mesh_color).set_alpha(options.mesh_alpha);

        let mut markers = PointCloud::new(format!("{} nodes", part.name()), positions.clone());
        markers
            .set_color(options.point_color)
            .set_size(options.point_size);

        Ok(Self {
            name: part.name().to_string(),
            keys,
            positions,
            cells,
            mesh,
            markers,
            arrows: None,
            isolines: None,
            isosurfaces: Vec::new(),
            scale_bar: None,
        })
    }

    /// Returns the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node keys in vertex order.
    #[must_use]
    pub fn node_keys(&self) -> &[usize] {
        &self.keys
    }

    /// Returns the vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Returns the part mesh.
    #[must_use]
    pub fn mesh(&self) -> &TetMesh {
        &self.mesh
    }

    /// Returns whether a displacement arrow field has been applied.
    #[must_use]
    pub fn has_arrows(&self) -> bool {
        self.arrows.is_some()
    }

    /// Returns extracted isoline levels, if any.
    #[must_use]
    pub fn isolines(&self) -> Option<&IsolineSet> {
        self.isolines.as_ref()
    }

    /// Returns the number of extracted isosurface shells.
    #[must_use]
    pub fn isosurface_count(&self) -> usize {
        self.isosurfaces.len()
    }

    /// Returns the scale bar, if a field is active.
    #[must_use]
    pub fn scale_bar(&self) -> Option<&ScaleBar> {
        self.scale_bar.as_ref()
    }

    /// Applies a nodal field to this part.
    ///
    /// The field is resolved per node key; nodes without a value count as
    /// zero. When a color map, isolines or isosurfaces are requested the
    /// field magnitude is applied to the mesh first, then the contours are
    /// traced from it, so they always match what the colors show. When
    /// `display.cmap` is empty the viewer's configured default is used.
    pub fn add_node_field_results<F: NodeFieldResults>(
        &mut self,
        field: &F,
        display: &FieldDisplay,
        options: &DisplayOptions,
        color_maps: &ColorMapRegistry,
    ) -> Result<()> {
        let vectors: Vec<Vec3> = self
            .keys
            .iter()
            .map(|&k| field.vector_at(k).unwrap_or(Vec3::ZERO))
            .collect();
        let magnitudes: Vec<f32> = vectors.iter().map(|v| v.length()).collect();

        // Colors, isolines and isosurfaces all need the field on the mesh;
        // a vectors-only display leaves the mesh in its base color.
        let draw_cmap = display.cmap.is_some()
            || display.isolines.is_some()
            || display.isosurfaces.is_some();
        if draw_cmap {
            let cmap = display.cmap.as_deref().unwrap_or(&options.color_map);
            self.mesh.set_scalar_quantity(
                field.field_name(),
                magnitudes,
                feaview_structures::QuantityLocation::Point,
                cmap,
                color_maps,
            )?;
        }

        if let Some(scale) = display.vectors {
            if scale != 0.0 {
                self.arrows = Some(ArrowField::new(
                    format!("{} {}", self.name, field.field_name()),
                    self.positions.clone(),
                    vectors,
                    scale,
                ));
            }
        }

        if let Some(n) = display.isolines {
            let levels = self.mesh.isolines(n)?;
            self.isolines = Some(IsolineSet::new(
                format!("{} isolines", self.name),
                levels,
            ));
        }

        if let Some(n) = display.isosurfaces {
            self.isosurfaces = self.mesh.isosurfaces(n, color_maps)?;
        }

        if let (Some(title), Some(map_name), Some(range)) = (
            self.mesh.active_scalar_field(),
            self.mesh.active_color_map(),
            self.mesh.scalar_field_range(),
        ) {
            if let Some(map) = color_maps.get(map_name) {
                self.scale_bar = Some(ScaleBar::new(title, map.clone(), range.0, range.1));
            }
        }

        Ok(())
    }

    /// Builds a mesh of this part displaced by the results of one analysis
    /// step, scaled by `scale`. Nodes without results stay put.
    pub fn deformed_mesh<P: FeaPart>(&self, part: &P, step: &str, scale: f32) -> Result<TetMesh> {
        let mut displacement_by_key: HashMap<usize, Vec3> = HashMap::new();
        for node in part.nodes() {
            if let Some(d) = node.displacement_at(step) {
                displacement_by_key.insert(node.key(), d);
            }
        }
        let displaced = self.displaced_positions(|key| displacement_by_key.get(&key).copied(), scale);
        Ok(TetMesh::new(
            format!("{} deformed", self.name),
            displaced,
            self.cells.clone(),
        ))
    }

    /// Builds a mesh of this part displaced by a mode shape.
    #[must_use]
    pub fn mode_shape_mesh(
        &self,
        shape: &dyn crate::model::ModeShape,
        scale: f32,
    ) -> TetMesh {
        let displaced = self.displaced_positions(|key| shape.displacement_at(key), scale);
        TetMesh::new(
            format!("{} {}", self.name, shape.label()),
            displaced,
            self.cells.clone(),
        )
    }

    /// Per-vertex scaled displacement magnitudes of a mode shape, aligned
    /// with [`PartViewer::mode_shape_mesh`] vertices.
    #[must_use]
    pub fn mode_shape_magnitudes(
        &self,
        shape: &dyn crate::model::ModeShape,
        scale: f32,
    ) -> Vec<f32> {
        self.keys
            .iter()
            .map(|&key| shape.displacement_at(key).unwrap_or(Vec3::ZERO).length() * scale)
            .collect()
    }

    fn displaced_positions(
        &self,
        displacement: impl Fn(usize) -> Option<Vec3>,
        scale: f32,
    ) -> Vec<Vec3> {
        self.keys
            .iter()
            .zip(&self.positions)
            .map(|(&key, &p)| p + displacement(key).unwrap_or(Vec3::ZERO) * scale)
            .collect()
    }

    /// Consumes the viewer state into scene drawables: mesh, markers, and
    /// any applied field decoration.
    #[must_use]
    pub fn into_drawables(self) -> Vec<Box<dyn Drawable>> {
        let mut drawables: Vec<Box<dyn Drawable>> =
            vec![Box::new(self.mesh), Box::new(self.markers)];
        if let Some(arrows) = self.arrows {
            drawables.push(Box::new(arrows));
        }
        if let Some(isolines) = self.isolines {
            drawables.push(Box::new(isolines));
        }
        for shell in self.isosurfaces {
            drawables.push(Box::new(shell));
        }
        if let Some(bar) = self.scale_bar {
            drawables.push(Box::new(bar));
        }
        drawables
    }
}
