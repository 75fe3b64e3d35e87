//! Integration tests for the model viewer, driven by a small in-memory
//! model: one part, one tetrahedral element, nodal displacement results.
//!
//! The windowed test is marked #[ignore] and should be run manually with:
//! cargo test -- --ignored

use std::collections::HashMap;

use feaview::{
    Capability, DisplayOptions, FeaElement, FeaModel, FeaNode, FeaPart, FeaViewError, FieldDisplay,
    Interface, ModeShape, ModelViewer, NodeFieldResults, NodeOrdering, ShowArgs, Vec3,
};

struct MiniNode {
    key: usize,
    position: Vec3,
    displacement: Option<Vec3>,
}

impl FeaNode for MiniNode {
    fn key(&self) -> usize {
        self.key
    }
    fn part_key(&self) -> usize {
        // Part-local numbering runs opposite to the model-wide keys, so the
        // two orderings are distinguishable
        100 - self.key
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn displacement_at(&self, step: &str) -> Option<Vec3> {
        (step == "step-1").then_some(self.displacement).flatten()
    }
}

struct MiniElement {
    key: usize,
    node_keys: Vec<usize>,
}

impl FeaElement for MiniElement {
    fn key(&self) -> usize {
        self.key
    }
    fn node_keys(&self) -> Vec<usize> {
        self.node_keys.clone()
    }
}

struct MiniPart {
    name: String,
    nodes: Vec<MiniNode>,
    elements: Vec<MiniElement>,
}

impl FeaPart for MiniPart {
    type Node = MiniNode;
    type Element = MiniElement;

    fn name(&self) -> &str {
        &self.name
    }
    fn nodes(&self) -> Vec<&MiniNode> {
        self.nodes.iter().collect()
    }
    fn elements(&self) -> Vec<&MiniElement> {
        self.elements.iter().collect()
    }
}

struct MiniModel {
    parts: Vec<MiniPart>,
    bcs: Vec<(String, Vec<Vec3>)>,
}

impl FeaModel for MiniModel {
    type Part = MiniPart;

    fn name(&self) -> &str {
        "mini"
    }
    fn parts(&self) -> Vec<&MiniPart> {
        self.parts.iter().collect()
    }
    fn boundary_conditions(&self) -> Vec<(String, Vec<Vec3>)> {
        self.bcs.clone()
    }
}

struct MiniField {
    name: String,
    vectors: HashMap<usize, Vec3>,
}

impl NodeFieldResults for MiniField {
    fn field_name(&self) -> &str {
        &self.name
    }
    fn vector_at(&self, node_key: usize) -> Option<Vec3> {
        self.vectors.get(&node_key).copied()
    }
}

struct MiniMode {
    label: String,
    vectors: HashMap<usize, Vec3>,
}

impl ModeShape for MiniMode {
    fn label(&self) -> String {
        self.label.clone()
    }
    fn displacement_at(&self, node_key: usize) -> Option<Vec3> {
        self.vectors.get(&node_key).copied()
    }
}

struct MiniInterface {
    name: String,
    points: Vec<Vec3>,
}

impl Interface for MiniInterface {
    fn name(&self) -> &str {
        &self.name
    }
    fn points(&self) -> Vec<Vec3> {
        self.points.clone()
    }
}

/// One tetrahedron with deliberately shuffled node keys, so ordering
/// actually matters.
fn tet_part(name: &str) -> MiniPart {
    MiniPart {
        name: name.to_string(),
        nodes: vec![
            MiniNode {
                key: 12,
                position: Vec3::Z,
                displacement: None,
            },
            MiniNode {
                key: 3,
                position: Vec3::new(1.0, 0.0, 0.0),
                displacement: Some(Vec3::new(0.5, 0.0, 0.0)),
            },
            MiniNode {
                key: 7,
                position: Vec3::Y,
                displacement: None,
            },
            MiniNode {
                key: 1,
                position: Vec3::ZERO,
                displacement: None,
            },
        ],
        elements: vec![MiniElement {
            key: 0,
            node_keys: vec![1, 3, 7, 12],
        }],
    }
}

fn mini_model() -> MiniModel {
    MiniModel {
        parts: vec![tet_part("block")],
        bcs: vec![(
            "pinned".to_string(),
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)],
        )],
    }
}

fn magnitude_field() -> MiniField {
    MiniField {
        name: "U".to_string(),
        vectors: HashMap::from([
            (1, Vec3::ZERO),
            (3, Vec3::new(1.0, 0.0, 0.0)),
            (7, Vec3::new(2.0, 0.0, 0.0)),
            (12, Vec3::new(3.0, 0.0, 0.0)),
        ]),
    }
}

#[test]
fn global_ordering_sorts_nodes_by_key() {
    let model = mini_model();
    let viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    let part = &viewer.parts()[0];
    assert_eq!(part.node_keys(), &[1, 3, 7, 12]);
    assert_eq!(part.positions()[0], Vec3::ZERO);
    assert_eq!(part.mesh().boundary_faces().len(), 4);
}

#[test]
fn part_local_ordering_sorts_by_part_key() {
    let model = mini_model();
    let viewer =
        ModelViewer::with_ordering(&model, DisplayOptions::default(), NodeOrdering::PartLocal)
            .unwrap();
    // Part-local keys are 100 - key, so the sort comes out reversed
    assert_eq!(viewer.parts()[0].node_keys(), &[12, 7, 3, 1]);
}

#[test]
fn orderings_describe_the_same_geometry() {
    let model = mini_model();
    let global = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    let local =
        ModelViewer::with_ordering(&model, DisplayOptions::default(), NodeOrdering::PartLocal)
            .unwrap();

    let mut a: Vec<[i64; 3]> = global.parts()[0]
        .positions()
        .iter()
        .map(|p| [p.x as i64, p.y as i64, p.z as i64])
        .collect();
    let mut b: Vec<[i64; 3]> = local.parts()[0]
        .positions()
        .iter()
        .map(|p| [p.x as i64, p.y as i64, p.z as i64])
        .collect();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

#[test]
fn unknown_node_key_is_rejected() {
    let mut part = tet_part("broken");
    part.elements[0].node_keys = vec![1, 3, 7, 99];
    let model = MiniModel {
        parts: vec![part],
        bcs: vec![],
    };
    let err = ModelViewer::new(&model, DisplayOptions::default()).unwrap_err();
    assert!(matches!(err, FeaViewError::UnknownNodeKey(99)));
}

#[test]
fn non_tet_connectivity_is_rejected() {
    let mut part = tet_part("broken");
    part.elements[0].node_keys = vec![1, 3, 7];
    let model = MiniModel {
        parts: vec![part],
        bcs: vec![],
    };
    let err = ModelViewer::new(&model, DisplayOptions::default()).unwrap_err();
    assert!(matches!(err, FeaViewError::NonTetElement(3)));
}

#[test]
fn deformed_shape_scales_displacements() {
    let model = mini_model();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_deformed_shape("step-1", 2.0).unwrap();

    let deformed = viewer.parts()[0]
        .deformed_mesh(&model.parts[0], "step-1", 2.0)
        .unwrap();
    // Node key 3 sits at (1,0,0) and moves by 2 * (0.5,0,0)
    let moved = deformed
        .vertices()
        .iter()
        .find(|v| (v.x - 2.0).abs() < 1e-6)
        .copied();
    assert_eq!(moved, Some(Vec3::new(2.0, 0.0, 0.0)));
    // Nodes without results stay put
    assert!(deformed.vertices().contains(&Vec3::ZERO));
}

#[test]
fn field_without_vector_scale_draws_no_arrows() {
    let model = mini_model();
    let field = magnitude_field();

    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_node_field_results(&field, &FieldDisplay::default())
        .unwrap();
    assert!(!viewer.parts()[0].has_arrows());

    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_node_field_results(
            &field,
            &FieldDisplay {
                vectors: Some(0.0),
                ..FieldDisplay::default()
            },
        )
        .unwrap();
    assert!(!viewer.parts()[0].has_arrows());

    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_node_field_results(
            &field,
            &FieldDisplay {
                vectors: Some(1.0),
                ..FieldDisplay::default()
            },
        )
        .unwrap();
    assert!(viewer.parts()[0].has_arrows());
}

#[test]
fn vectors_only_field_leaves_mesh_uncolored() {
    let model = mini_model();
    let field = magnitude_field();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_node_field_results(
            &field,
            &FieldDisplay {
                vectors: Some(1.0),
                ..FieldDisplay::default()
            },
        )
        .unwrap();

    // Arrows yes, but no color map, no field on the mesh, no scale bar
    let part = &viewer.parts()[0];
    assert!(part.has_arrows());
    assert!(part.mesh().active_scalar_field().is_none());
    assert!(part.scale_bar().is_none());
}

#[test]
fn field_applies_colors_then_isolines() {
    let model = mini_model();
    let field = magnitude_field();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_node_field_results(
            &field,
            &FieldDisplay {
                isolines: Some(5),
                ..FieldDisplay::default()
            },
        )
        .unwrap();

    let part = &viewer.parts()[0];
    assert_eq!(part.mesh().active_scalar_field(), Some("U"));
    assert_eq!(part.mesh().active_color_map(), Some("jet"));
    let isolines = part.isolines().unwrap();
    assert_eq!(isolines.levels().len(), 5);
    // Every requested level crosses this tet's field
    assert!(isolines.levels().iter().all(|l| !l.segments.is_empty()));
    // Scale bar legends the applied field
    assert_eq!(part.scale_bar().unwrap().title(), "U");
}

#[test]
fn field_isosurfaces_are_extracted() {
    let model = mini_model();
    let field = magnitude_field();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_node_field_results(
            &field,
            &FieldDisplay {
                isosurfaces: Some(3),
                ..FieldDisplay::default()
            },
        )
        .unwrap();
    assert_eq!(viewer.parts()[0].isosurface_count(), 3);
}

#[test]
fn bcs_produce_one_glyph_set_per_condition() {
    let model = mini_model();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_bcs();
    let viewer = viewer.into_viewer().unwrap();
    // panel 0: mesh + markers + one cone glyph set
    assert_eq!(viewer.scene().panels()[0].len(), 3);
}

#[test]
fn show_args_toggle_whole_categories() {
    let model = mini_model();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_bcs();
    let viewer = viewer
        .into_viewer_with(&ShowArgs {
            show_bcs: false,
            ..ShowArgs::default()
        })
        .unwrap();
    // Only the part mesh and markers survive
    assert_eq!(viewer.scene().panels()[0].len(), 2);

    // show_parts covers the part meshes, deformed shapes and mode frames
    let model = mini_model();
    let mode = MiniMode {
        label: "mode 1".to_string(),
        vectors: HashMap::from([(1, Vec3::Z)]),
    };
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_bcs();
    viewer.add_deformed_shape("step-1", 2.0).unwrap();
    viewer.add_mode_shapes(std::slice::from_ref(&mode), 1.0).unwrap();
    let viewer = viewer
        .into_viewer_with(&ShowArgs {
            show_parts: false,
            ..ShowArgs::default()
        })
        .unwrap();
    assert_eq!(viewer.scene().panels()[0].len(), 1);
    assert!(viewer.scene().panels()[1].is_empty());
}

#[test]
fn mode_frames_are_colored_by_amplitude() {
    let model = mini_model();
    let mode = MiniMode {
        label: "mode 1".to_string(),
        vectors: HashMap::from([(1, Vec3::Z), (3, Vec3::Z * 2.0)]),
    };
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_mode_shapes(std::slice::from_ref(&mode), 5.0).unwrap();
    let viewer = viewer.into_viewer().unwrap();
    assert_eq!(viewer.scene().panels()[1].len(), 1);
}

#[test]
fn stress_fields_are_declared_unsupported() {
    let model = mini_model();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    let err = viewer.add_stress_field_results("S").unwrap_err();
    assert!(matches!(err, FeaViewError::UnsupportedCapability(_)));
    assert!(!ModelViewer::<MiniModel>::supports(Capability::StressFields));
    assert!(ModelViewer::<MiniModel>::supports(Capability::NodeFields));
}

#[test]
fn degenerate_interfaces_are_skipped_and_counted() {
    let model = mini_model();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_interfaces(&[
        MiniInterface {
            name: "good".to_string(),
            points: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        },
        MiniInterface {
            name: "degenerate".to_string(),
            points: vec![Vec3::ZERO, Vec3::X],
        },
    ]);
    assert_eq!(viewer.skipped_interfaces(), 1);
    let viewer = viewer.into_viewer().unwrap();
    // mesh + markers + the one surviving patch
    assert_eq!(viewer.scene().panels()[0].len(), 3);
}

#[test]
fn mode_shapes_take_one_panel_each() {
    let model = mini_model();
    let mode = |label: &str| MiniMode {
        label: label.to_string(),
        vectors: HashMap::from([(1, Vec3::Z)]),
    };

    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer
        .add_mode_shapes(&[mode("mode 1"), mode("mode 2"), mode("mode 3")], 10.0)
        .unwrap();
    let viewer = viewer.into_viewer().unwrap();
    for panel in 1..=3 {
        assert_eq!(viewer.scene().panels()[panel].len(), 1);
    }
}

#[test]
fn too_many_mode_shapes_overflow_the_grid() {
    let model = mini_model();
    let modes: Vec<MiniMode> = (0..4)
        .map(|i| MiniMode {
            label: format!("mode {i}"),
            vectors: HashMap::new(),
        })
        .collect();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    // 2x2 grid: panel 0 is the main view, so only 3 mode frames fit
    let err = viewer.add_mode_shapes(&modes, 1.0).unwrap_err();
    assert!(matches!(err, FeaViewError::PanelOutOfRange { .. }));
}

#[test]
fn add_part_tracks_before_assembly() {
    let model = mini_model();
    let extra = tet_part("extra");
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    assert_eq!(viewer.parts().len(), 1);
    viewer.add_part(&extra).unwrap();
    assert_eq!(viewer.parts().len(), 2);

    let field = magnitude_field();
    viewer
        .add_node_field_results(&field, &FieldDisplay::default())
        .unwrap();
    // Broadcast reached the later-added part too
    assert_eq!(viewer.parts()[1].mesh().active_scalar_field(), Some("U"));
}

/// Opens a real window; run manually with: cargo test -- --ignored
#[test]
#[ignore]
fn show_window() {
    let model = mini_model();
    let field = magnitude_field();
    let mut viewer = ModelViewer::new(&model, DisplayOptions::default()).unwrap();
    viewer.add_bcs();
    viewer
        .add_node_field_results(
            &field,
            &FieldDisplay {
                vectors: Some(1.0),
                isolines: Some(5),
                ..FieldDisplay::default()
            },
        )
        .unwrap();
    viewer.show(ShowArgs::default()).unwrap();
}
