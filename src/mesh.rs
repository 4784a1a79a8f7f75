use crate::types::{Point, Vector};

/// Final mesh output: three flat parallel buffers.
///
/// `vertices` and `normals` are stride-3 `f32` sequences aligned 1:1;
/// `indices` holds one `u32` per emitted vertex in emission order, three per
/// triangle. Vertices are not deduplicated across cubes, so the index buffer
/// is simply `0..N-1` — downstream consumers can use the buffers zero-copy
/// as a plain triangle soup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Flat vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f32>,
    /// Triangle indices into `vertices`, sequential in emission order.
    pub indices: Vec<u32>,
    /// Flat per-vertex unit normals, aligned with `vertices`.
    pub normals: Vec<f32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one vertex/normal pair and its sequential index.
    #[inline]
    pub fn push_vertex(&mut self, position: Point, normal: Vector) {
        self.indices.push((self.vertices.len() / 3) as u32);
        self.vertices
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
    }

    /// Number of emitted vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Moves all data out of `other` onto the end of `self`, offsetting
    /// `other`'s indices by the running vertex count.
    ///
    /// Concatenating per-worker buffers in worker order with this method
    /// keeps parallel extraction deterministic.
    pub fn append(&mut self, other: &mut MeshBuffers) {
        let offset = self.vertex_count() as u32;
        self.indices.extend(other.indices.drain(..).map(|i| i + offset));
        self.vertices.append(&mut other.vertices);
        self.normals.append(&mut other.normals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_tri(base: f32) -> MeshBuffers {
        let mut mesh = MeshBuffers::new();
        for i in 0..3 {
            mesh.push_vertex(
                Point::new(base + i as f32, 0.0, 0.0),
                Vector::new(0.0, 1.0, 0.0),
            );
        }
        mesh
    }

    #[test]
    fn push_vertex_keeps_buffers_parallel() {
        let mesh = buffer_with_tri(0.0);
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.normals.len(), 9);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn append_offsets_indices() {
        let mut a = buffer_with_tri(0.0);
        let mut b = buffer_with_tri(10.0);
        a.append(&mut b);

        assert_eq!(a.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(a.vertex_count(), 6);
        assert!(b.is_empty());
        // appended vertices keep their positions
        assert_eq!(a.vertices[9], 10.0);
    }

    #[test]
    fn append_empty_is_noop() {
        let mut a = buffer_with_tri(0.0);
        let mut empty = MeshBuffers::new();
        a.append(&mut empty);
        assert_eq!(a.triangle_count(), 1);
    }
}
