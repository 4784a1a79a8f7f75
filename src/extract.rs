use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    error::{MarchingCubesError, Result},
    field::{Metaball, gradient_at},
    grid::CornerGrid,
    mesh::MeshBuffers,
    tables::EDGE_TABLE,
    types::{Point, Value, Vector},
    utils::{cube_corner_positions, cube_state, edge_crossings, state_triangles},
};

/// Gradient magnitudes below this fall back to [`FALLBACK_NORMAL`].
const GRADIENT_EPSILON: Value = 1e-12;

/// Arbitrary unit normal used where the field gradient vanishes (e.g. a
/// crossing resolved at the midpoint of an edge with equal corner values).
const FALLBACK_NORMAL: Vector = Vector::new(0.0, 1.0, 0.0);

/// Extracts the iso-surface of the summed metaball field as a triangle mesh.
///
/// Walks `resolution³` unit cubes over the `[0, 1]³` domain, classifies each
/// against `threshold` (corner values `>= threshold` are inside) and emits
/// interpolated triangles with analytic-gradient normals. Field values at the
/// `(resolution + 1)³` lattice corners are sampled once up front.
///
/// A pure function of its inputs: identical arguments produce byte-identical
/// buffers, including under the parallel sweep. An empty `metaballs` slice is
/// valid and yields an empty mesh.
///
/// Returns [`MarchingCubesError::InvalidResolution`] when `resolution == 0`.
pub fn generate(resolution: u32, metaballs: &[Metaball], threshold: Value) -> Result<MeshBuffers> {
    if resolution == 0 {
        return Err(MarchingCubesError::InvalidResolution);
    }

    let grid = CornerGrid::sample(resolution, metaballs);
    let mesh = march(&grid, metaballs, threshold);

    debug!(
        resolution,
        metaballs = metaballs.len(),
        threshold,
        triangles = mesh.triangle_count(),
        "generated iso-surface"
    );

    Ok(mesh)
}

/// [`generate`] with a fixed built-in metaball configuration, for demos and
/// benchmarking.
///
/// The configuration is two overlapping balls on the x-axis plus a smaller
/// offset ball, at threshold `0.2` — enough to show smooth blending. It is a
/// convenience default, not a contract.
pub fn generate_default(resolution: u32) -> Result<MeshBuffers> {
    let metaballs = [
        Metaball::new(0.38, 0.5, 0.5, 0.32, 1.0)?,
        Metaball::new(0.62, 0.5, 0.5, 0.32, 1.0)?,
        Metaball::new(0.5, 0.68, 0.5, 0.22, 0.8)?,
    ];
    generate(resolution, &metaballs, 0.2)
}

/// Runs the marching cubes sweep over a sampled corner grid.
///
/// Work is parallelised over X slices using Rayon; each slice accumulates
/// into a private [`MeshBuffers`] and the slices are concatenated in order
/// (with index offsets) so the output is deterministic.
///
/// ```text
/// Per cube:
/// 1. cube_corner_values   →  8 memoized scalar values
/// 2. cube_state           →  256-entry lookup key
/// 3. EDGE_TABLE[state]    →  bitmask of intersected edges
/// 4. edge_crossings       →  up to 12 interpolated points
/// 5. state_triangles      →  edge triples from TRI_TABLE
/// 6. normal_at            →  unit normal per emitted vertex
/// ```
fn march(grid: &CornerGrid, metaballs: &[Metaball], threshold: Value) -> MeshBuffers {
    let resolution = grid.resolution();
    let size = resolution as usize;

    let per_x: Vec<MeshBuffers> = (0..size)
        .into_par_iter()
        .map(|x| {
            let mut local = MeshBuffers::new();

            for y in 0..size {
                for z in 0..size {
                    let corner_values = grid.cube_corner_values(x, y, z);
                    let state = cube_state(&corner_values, threshold);

                    let edges_mask = EDGE_TABLE[state];
                    if edges_mask == 0 {
                        continue;
                    }

                    let corner_positions = cube_corner_positions(x, y, z, resolution);
                    let crossings =
                        edge_crossings(edges_mask, &corner_positions, &corner_values, threshold);

                    for tri in state_triangles(state) {
                        // The table's winding is clockwise seen from outside
                        // for this corner labeling; reverse it so triangles
                        // face outward with sequential indices.
                        for &edge in tri.iter().rev() {
                            let position =
                                crossings[edge].expect("crossed edge without interpolated point");
                            local.push_vertex(position, normal_at(position, metaballs));
                        }
                    }
                }
            }
            local
        })
        .collect();

    // Merge per-X slices into a single set of buffers, offsetting indices
    // by the running vertex count.
    let mut mesh = MeshBuffers::new();
    for mut local in per_x {
        mesh.append(&mut local);
    }
    mesh
}

/// Unit surface normal at `position`: the negated, normalized field gradient.
///
/// The field is high inside the surface, so the gradient points inward and
/// its negation outward — consistent with the emitted triangle winding. A
/// (near-)zero gradient falls back to a fixed unit vector so no NaN ever
/// reaches the output buffers.
#[inline]
fn normal_at(position: Point, metaballs: &[Metaball]) -> Vector {
    let gradient = gradient_at(position, metaballs);
    let magnitude = gradient.norm();
    if magnitude <= GRADIENT_EPSILON {
        return FALLBACK_NORMAL;
    }
    -gradient / magnitude
}
