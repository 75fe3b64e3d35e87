//! Contour extraction for scalar fields on meshes.
//!
//! Two extraction paths, both driven by sign classification against a level
//! value and linear interpolation along crossing edges:
//!
//! - **Isolines**: marching triangles over a boundary surface (triangle soup
//!   with per-vertex scalars), producing line segments per level.
//! - **Isosurfaces**: marching tetrahedra over tetrahedral cells, producing a
//!   triangle shell per level.
//!
//! Triangle orientation of extracted shells is not guaranteed; the render
//! backend lights surfaces two-sided.

#![allow(clippy::cast_precision_loss)]

use glam::Vec3;

/// Line segments of one isoline level.
#[derive(Debug, Clone)]
pub struct IsolineLevel {
    /// The scalar value of this level.
    pub value: f32,
    /// Extracted segments (unordered, world space).
    pub segments: Vec<(Vec3, Vec3)>,
}

/// Triangle mesh of one isosurface level.
#[derive(Debug, Clone, Default)]
pub struct IsosurfaceMesh {
    /// The scalar value of this level.
    pub value: f32,
    /// Interpolated vertex positions.
    pub vertices: Vec<Vec3>,
    /// Triangle indices.
    pub triangles: Vec<[u32; 3]>,
}

impl IsosurfaceMesh {
    /// Returns true if no triangles were extracted at this level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Returns the (min, max) range of a scalar slice, or `None` if empty.
#[must_use]
pub fn scalar_range(scalars: &[f32]) -> Option<(f32, f32)> {
    let first = *scalars.first()?;
    let mut min = first;
    let mut max = first;
    for &s in &scalars[1..] {
        min = min.min(s);
        max = max.max(s);
    }
    Some((min, max))
}

/// Computes `n` isoline level values strictly interior to `[min, max]`.
///
/// Interior placement (`(i + 1) / (n + 1)` fractions) guarantees that every
/// level of a non-degenerate field crosses the surface, so extraction yields
/// exactly `n` curves.
#[must_use]
pub fn isoline_levels(min: f32, max: f32, n: usize) -> Vec<f32> {
    let span = max - min;
    (0..n)
        .map(|i| min + span * (i + 1) as f32 / (n + 1) as f32)
        .collect()
}

/// Computes `n` isosurface threshold values linearly interpolated between the
/// scalar minimum and maximum.
///
/// `n == 1` yields the minimum alone. `min == max` yields `n` coincident
/// thresholds; the zero-width surfaces that result are not guarded here.
#[must_use]
pub fn isosurface_levels(scalars: &[f32], n: usize) -> Vec<f32> {
    let Some((min, max)) = scalar_range(scalars) else {
        return Vec::new();
    };
    if n <= 1 {
        return vec![min; n];
    }
    let span = max - min;
    (0..n)
        // rounding can push the interpolated endpoints past the range
        .map(|i| (min + span * i as f32 / (n - 1) as f32).clamp(min, max))
        .collect()
}

/// Interpolates the crossing point of `level` on the edge `(a, b)`.
fn edge_crossing(a: Vec3, b: Vec3, da: f32, db: f32) -> Vec3 {
    let denom = da - db;
    let t = if denom.abs() < f32::EPSILON {
        0.5
    } else {
        (da / denom).clamp(0.0, 1.0)
    };
    a.lerp(b, t)
}

/// Extracts isoline segments of `n` interior levels from a triangle soup.
///
/// `triangles` holds vertex indices into `vertices`; `scalars` is per-vertex.
/// Returns one [`IsolineLevel`] per level, in ascending level order. Levels
/// that cross nothing yield empty segment lists (degenerate fields only).
#[must_use]
pub fn extract_isolines(
    vertices: &[Vec3],
    triangles: &[[u32; 3]],
    scalars: &[f32],
    n: usize,
) -> Vec<IsolineLevel> {
    let Some((min, max)) = scalar_range(scalars) else {
        return Vec::new();
    };

    isoline_levels(min, max, n)
        .into_iter()
        .map(|value| IsolineLevel {
            value,
            segments: isoline_segments(vertices, triangles, scalars, value),
        })
        .collect()
}

/// Marching-triangles segment extraction for a single level.
fn isoline_segments(
    vertices: &[Vec3],
    triangles: &[[u32; 3]],
    scalars: &[f32],
    value: f32,
) -> Vec<(Vec3, Vec3)> {
    let mut segments = Vec::new();

    for tri in triangles {
        let d = [
            scalars[tri[0] as usize] - value,
            scalars[tri[1] as usize] - value,
            scalars[tri[2] as usize] - value,
        ];

        let mut crossings: Vec<Vec3> = Vec::with_capacity(2);
        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            if (d[i] < 0.0) != (d[j] < 0.0) {
                crossings.push(edge_crossing(
                    vertices[tri[i] as usize],
                    vertices[tri[j] as usize],
                    d[i],
                    d[j],
                ));
            }
        }

        if crossings.len() == 2 {
            segments.push((crossings[0], crossings[1]));
        }
    }

    segments
}

/// Extracts the isosurface of a single level from tetrahedral cells.
///
/// `cells` holds per-tet vertex indices into `vertices`; `scalars` is
/// per-vertex. Crossing points are emitted per tet without welding; the shells
/// are display geometry, not simulation meshes.
#[must_use]
pub fn extract_isosurface(
    vertices: &[Vec3],
    cells: &[[u32; 4]],
    scalars: &[f32],
    value: f32,
) -> IsosurfaceMesh {
    let mut mesh = IsosurfaceMesh {
        value,
        ..IsosurfaceMesh::default()
    };

    for cell in cells {
        let d = [
            scalars[cell[0] as usize] - value,
            scalars[cell[1] as usize] - value,
            scalars[cell[2] as usize] - value,
            scalars[cell[3] as usize] - value,
        ];

        // 4-bit configuration from corner signs
        let mask = usize::from(d[0] < 0.0)
            | usize::from(d[1] < 0.0) << 1
            | usize::from(d[2] < 0.0) << 2
            | usize::from(d[3] < 0.0) << 3;

        if mask == 0 || mask == 0b1111 {
            continue;
        }

        let inside: Vec<usize> = (0..4).filter(|&i| d[i] < 0.0).collect();

        let crossing = |i: usize, j: usize| {
            edge_crossing(
                vertices[cell[i] as usize],
                vertices[cell[j] as usize],
                d[i],
                d[j],
            )
        };

        if inside.len() == 1 || inside.len() == 3 {
            // One corner separated: single triangle through its three edges.
            let apex = if inside.len() == 1 {
                inside[0]
            } else {
                (0..4).find(|i| !inside.contains(i)).unwrap_or(0)
            };
            let others: Vec<usize> = (0..4).filter(|&i| i != apex).collect();
            let pts = [
                crossing(apex, others[0]),
                crossing(apex, others[1]),
                crossing(apex, others[2]),
            ];
            push_triangle(&mut mesh, pts[0], pts[1], pts[2]);
        } else {
            // Two-two split: quad through the four straddling edges.
            let (a, b) = (inside[0], inside[1]);
            let outside: Vec<usize> = (0..4).filter(|i| !inside.contains(i)).collect();
            let (c, o) = (outside[0], outside[1]);
            let ac = crossing(a, c);
            let ao = crossing(a, o);
            let bo = crossing(b, o);
            let bc = crossing(b, c);
            push_triangle(&mut mesh, ac, ao, bo);
            push_triangle(&mut mesh, ac, bo, bc);
        }
    }

    mesh
}

fn push_triangle(mesh: &mut IsosurfaceMesh, a: Vec3, b: Vec3, c: Vec3) {
    #[allow(clippy::cast_possible_truncation)]
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(&[a, b, c]);
    mesh.triangles.push([base, base + 1, base + 2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> (Vec<Vec3>, Vec<[u32; 4]>) {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        (vertices, vec![[0, 1, 2, 3]])
    }

    #[test]
    fn test_isoline_levels_interior() {
        let levels = isoline_levels(0.0, 4.0, 3);
        assert_eq!(levels, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_isosurface_levels_single_is_min() {
        let levels = isosurface_levels(&[3.0, 1.0, 2.0], 1);
        assert_eq!(levels, vec![1.0]);
    }

    #[test]
    fn test_isosurface_levels_inclusive_spacing() {
        let levels = isosurface_levels(&[0.0, 10.0], 5);
        assert_eq!(levels, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_isosurface_levels_never_overshoot() {
        // Wide ranges round the top interpolant past the maximum without
        // the clamp; the last level must compare <= max exactly.
        let scalars = [-982.53687f32, 988.81104];
        let levels = isosurface_levels(&scalars, 4);
        for level in &levels {
            assert!(*level >= scalars[0] && *level <= scalars[1]);
        }
        assert_eq!(*levels.last().unwrap(), scalars[1]);
    }

    #[test]
    fn test_isosurface_levels_degenerate_range() {
        let levels = isosurface_levels(&[2.0, 2.0, 2.0], 3);
        assert_eq!(levels, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_extract_isolines_count() {
        // Tet surface with scalars 0..=3: every interior level must cross.
        let (vertices, _) = unit_tet();
        let faces = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
        let scalars = vec![0.0, 1.0, 2.0, 3.0];

        let levels = extract_isolines(&vertices, &faces, &scalars, 5);
        assert_eq!(levels.len(), 5);
        for level in &levels {
            assert!(
                !level.segments.is_empty(),
                "level {} extracted no segments",
                level.value
            );
        }
    }

    #[test]
    fn test_extract_isosurface_one_corner() {
        // Only vertex 0 is below the level: single triangle.
        let (vertices, cells) = unit_tet();
        let scalars = vec![0.0, 1.0, 1.0, 1.0];
        let mesh = extract_isosurface(&vertices, &cells, &scalars, 0.5);
        assert_eq!(mesh.triangles.len(), 1);
        // Crossings lie at edge midpoints
        for v in &mesh.vertices {
            assert!((v.length() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_extract_isosurface_two_two_split() {
        let (vertices, cells) = unit_tet();
        let scalars = vec![0.0, 0.0, 1.0, 1.0];
        let mesh = extract_isosurface(&vertices, &cells, &scalars, 0.5);
        assert_eq!(mesh.triangles.len(), 2, "quad split into two triangles");
    }

    #[test]
    fn test_extract_isosurface_outside_range() {
        let (vertices, cells) = unit_tet();
        let scalars = vec![0.0, 1.0, 2.0, 3.0];
        let mesh = extract_isosurface(&vertices, &cells, &scalars, 5.0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_scalar_range() {
        assert_eq!(scalar_range(&[2.0, -1.0, 5.0]), Some((-1.0, 5.0)));
        assert_eq!(scalar_range(&[]), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn isoline_levels_stay_interior(
                min in -1000.0f32..1000.0,
                span in 0.001f32..1000.0,
                n in 1usize..32,
            ) {
                let max = min + span;
                let levels = isoline_levels(min, max, n);
                prop_assert_eq!(levels.len(), n);
                for pair in levels.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
                prop_assert!(levels[0] > min);
                prop_assert!(levels[n - 1] < max);
            }

            #[test]
            fn isosurface_levels_bounded_by_range(
                scalars in proptest::collection::vec(-1000.0f32..1000.0, 1..64),
                n in 1usize..16,
            ) {
                let (min, max) = scalar_range(&scalars).unwrap();
                let levels = isosurface_levels(&scalars, n);
                prop_assert_eq!(levels.len(), n);
                for level in levels {
                    prop_assert!(level >= min && level <= max);
                }
            }
        }
    }
}
