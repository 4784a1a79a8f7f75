use crate::{
    grid::lattice_to_point,
    interp::{find_t, interpolate_points},
    tables::{CORNER_POINT_INDICES, TRI_TABLE},
    types::{Point, Value},
};

/// Computes the marching cubes state bitmask for one cube.
///
/// Each of the 8 corners maps to one bit. A bit is set when the corner's
/// field value is **at or above** the threshold (i.e. "inside" the surface —
/// the metaball field is high inside and falls off outward):
///
/// ```text
/// corner index:  7  6  5  4  3  2  1  0
/// state bits:   [_][_][_][_][_][_][_][_]
///                                      ^-- corner 0 inside?
/// ```
#[inline]
pub fn cube_state(corner_values: &[Value; 8], threshold: Value) -> usize {
    let mut state: usize = 0;
    for (i, &v) in corner_values.iter().enumerate() {
        if v >= threshold {
            state |= 1 << i;
        }
    }
    state
}

/// Returns the 8 field-sample positions of the cube at grid index `(x, y, z)`,
/// in the standard corner order (see [`crate::grid::cube_corner_indices`]).
#[inline]
pub fn cube_corner_positions(x: usize, y: usize, z: usize, resolution: u32) -> [Point; 8] {
    [
        lattice_to_point(x, y, z, resolution),
        lattice_to_point(x + 1, y, z, resolution),
        lattice_to_point(x + 1, y + 1, z, resolution),
        lattice_to_point(x, y + 1, z, resolution),
        lattice_to_point(x, y, z + 1, resolution),
        lattice_to_point(x + 1, y, z + 1, resolution),
        lattice_to_point(x + 1, y + 1, z + 1, resolution),
        lattice_to_point(x, y + 1, z + 1, resolution),
    ]
}

/// Interpolates the crossing point along each edge of the cube that the
/// iso-surface intersects.
///
/// `edges_mask` is a 12-bit field from `EDGE_TABLE` — a set bit means that
/// edge is crossed. For each crossed edge, the crossing is found by linearly
/// interpolating between the edge's endpoint positions at the iso-value;
/// equal endpoint values fall back to the edge midpoint (see
/// [`find_t`]).
#[inline]
pub fn edge_crossings(
    edges_mask: u16,
    corner_positions: &[Point; 8],
    corner_values: &[Value; 8],
    threshold: Value,
) -> [Option<Point>; 12] {
    let mut crossings: [Option<Point>; 12] = [None; 12];

    for i in 0..12_usize {
        if (edges_mask & (1 << i)) == 0 {
            continue;
        }

        let pair = CORNER_POINT_INDICES[i];
        let v0 = corner_values[pair[0] as usize];
        let v1 = corner_values[pair[1] as usize];
        let p0 = corner_positions[pair[0] as usize];
        let p1 = corner_positions[pair[1] as usize];

        let t = find_t(v0, v1, threshold);
        crossings[i] = Some(interpolate_points(p0, p1, t));
    }

    crossings
}

/// Iterates the triangles of a marching cubes `state` as edge-index triples.
///
/// `TRI_TABLE[state]` contains edge indices in groups of three, terminated by `-1`:
/// ```text
/// TRI_TABLE[state] = [e0, e1, e2,  e3, e4, e5,  -1, ...]
///                     \___tri0__/   \___tri1__/
/// ```
#[inline]
pub fn state_triangles(state: usize) -> impl Iterator<Item = [usize; 3]> {
    TRI_TABLE[state]
        .chunks_exact(3)
        .take_while(|tri| tri[0] != -1)
        .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::EDGE_TABLE;

    #[test]
    fn state_all_outside_and_all_inside() {
        assert_eq!(cube_state(&[0.0; 8], 0.5), 0x00);
        assert_eq!(cube_state(&[1.0; 8], 0.5), 0xff);
        // at-threshold counts as inside
        assert_eq!(cube_state(&[0.5; 8], 0.5), 0xff);
    }

    #[test]
    fn state_single_corner() {
        let mut values = [0.0; 8];
        values[3] = 1.0;
        assert_eq!(cube_state(&values, 0.5), 1 << 3);
    }

    #[test]
    fn crossings_cover_exactly_the_masked_edges() {
        let mut values = [0.0; 8];
        values[0] = 1.0;
        let state = cube_state(&values, 0.5);
        let mask = EDGE_TABLE[state];
        let positions = cube_corner_positions(0, 0, 0, 1);
        let crossings = edge_crossings(mask, &positions, &values, 0.5);
        for (i, crossing) in crossings.iter().enumerate() {
            assert_eq!(crossing.is_some(), mask & (1 << i) != 0, "edge {i}");
        }
        // corner 0 alone crosses edges 0, 3, 8
        assert_eq!(mask, 0b0001_0000_1001);
    }

    #[test]
    fn state_triangles_stop_at_sentinel() {
        assert_eq!(state_triangles(0x00).count(), 0);
        assert_eq!(state_triangles(0x01).count(), 1);
        // complement of one corner: same single triangle topology
        assert_eq!(state_triangles(0xfe).count(), 1);
    }
}
