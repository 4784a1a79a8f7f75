use ndarray::Array3;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    field::{Metaball, field_at},
    types::{Point, Value},
};

/// Memoized scalar field samples over the corner lattice of the cube grid.
///
/// The grid has `resolution` cubes and `(resolution + 1)` corner points per
/// axis. Each interior corner is shared by up to 8 cubes, so sampling the
/// whole lattice once up front saves ~8× over per-cube evaluation.
///
/// Values are stored in a flat [`Array3`] indexed `[x, y, z]` so the cube
/// sweep walks contiguous memory.
///
/// # Coordinate mapping
///
/// Corner index `(i, j, k)` samples the field at `(i, j, k) / resolution` —
/// the lattice spans the unit cube `[0, 1]³` and metaball centers are
/// authored in that domain. This mapping is fixed and identical across calls.
pub struct CornerGrid {
    resolution: u32,
    values: Array3<Value>,
}

impl CornerGrid {
    /// Evaluates the summed metaball field at every corner of the lattice.
    ///
    /// Sampling is parallelised over X slices; slice order is preserved when
    /// the cache is assembled, so the result is deterministic.
    pub fn sample(resolution: u32, metaballs: &[Metaball]) -> Self {
        let n = resolution as usize + 1;

        let per_x: Vec<Vec<Value>> = (0..n)
            .into_par_iter()
            .map(|x| {
                let mut slice = Vec::with_capacity(n * n);
                for y in 0..n {
                    for z in 0..n {
                        let point = lattice_to_point(x, y, z, resolution);
                        slice.push(field_at(point, metaballs));
                    }
                }
                slice
            })
            .collect();

        let mut data = Vec::with_capacity(n * n * n);
        for mut slice in per_x {
            data.append(&mut slice);
        }

        let values =
            Array3::from_shape_vec((n, n, n), data).expect("corner cache dimensions mismatch");

        Self { resolution, values }
    }

    /// Number of cubes per axis.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Returns the field value at corner `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Value {
        self.values[[x, y, z]]
    }

    /// Returns the 8 field values at the corners of the cube at `(x, y, z)`,
    /// in the standard marching cubes corner order (see
    /// [`cube_corner_indices`]).
    #[inline]
    pub fn cube_corner_values(&self, x: usize, y: usize, z: usize) -> [Value; 8] {
        cube_corner_indices(x, y, z).map(|[cx, cy, cz]| self.get(cx, cy, cz))
    }
}

/// Maps corner index `(i, j, k)` to its field-sample position in `[0, 1]³`.
#[inline]
pub fn lattice_to_point(i: usize, j: usize, k: usize, resolution: u32) -> Point {
    let step = 1.0 / resolution as Value;
    Point::new(i as Value * step, j as Value * step, k as Value * step)
}

/// Returns the 8 corner indices `[x, y, z]` of the cube at `(x, y, z)`.
///
/// Corners are ordered to match the standard marching cubes convention used
/// by `EDGE_TABLE` and `TRI_TABLE`:
///
/// ```text
///     7----6          Y
///    /|   /|          |
///   3----2 |          *-- X
///   | 4--|-5         /
///   |/   |/         Z
///   0----1
///
///  0 = (x,   y,   z  )    4 = (x,   y,   z+1)
///  1 = (x+1, y,   z  )    5 = (x+1, y,   z+1)
///  2 = (x+1, y+1, z  )    6 = (x+1, y+1, z+1)
///  3 = (x,   y+1, z  )    7 = (x,   y+1, z+1)
/// ```
#[inline]
pub fn cube_corner_indices(x: usize, y: usize, z: usize) -> [[usize; 3]; 8] {
    [
        [x, y, z],
        [x + 1, y, z],
        [x + 1, y + 1, z],
        [x, y + 1, z],
        [x, y, z + 1],
        [x + 1, y, z + 1],
        [x + 1, y + 1, z + 1],
        [x, y + 1, z + 1],
    ]
}
