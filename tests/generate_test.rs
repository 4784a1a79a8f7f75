use std::collections::HashMap;

use marching_metaballs::{MarchingCubesError, Metaball, MeshBuffers, generate, generate_default};

fn centered_ball() -> Vec<Metaball> {
    vec![Metaball::new(0.5, 0.5, 0.5, 0.45, 1.0).unwrap()]
}

fn assert_buffer_invariants(mesh: &MeshBuffers) {
    assert_eq!(mesh.vertices.len(), mesh.normals.len());
    assert_eq!(mesh.vertices.len(), mesh.indices.len() * 3);
    assert_eq!(mesh.indices.len() % 3, 0);
    // indices are sequential in emission order
    for (i, &index) in mesh.indices.iter().enumerate() {
        assert_eq!(index, i as u32);
    }
    for &v in mesh.vertices.iter().chain(mesh.normals.iter()) {
        assert!(v.is_finite(), "non-finite value in output buffers");
    }
}

#[test]
fn buffers_stay_parallel_and_finite() {
    let configs: Vec<(Vec<Metaball>, f32)> = vec![
        (vec![], 0.5),
        (centered_ball(), 0.3),
        (
            vec![
                Metaball::new(0.4, 0.5, 0.5, 0.3, 1.0).unwrap(),
                Metaball::new(0.6, 0.5, 0.5, 0.3, -0.5).unwrap(),
                Metaball::new(0.5, 0.6, 0.4, 0.2, 0.0).unwrap(),
            ],
            0.15,
        ),
    ];

    for (metaballs, threshold) in configs {
        let mesh = generate(16, &metaballs, threshold).unwrap();
        assert_buffer_invariants(&mesh);
    }
}

#[test]
fn empty_metaball_list_yields_empty_mesh() {
    let mesh = generate(8, &[], 0.5).unwrap();
    assert!(mesh.is_empty());
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn uniform_zero_field_is_handled_for_any_threshold() {
    // threshold <= 0 makes every corner of the zero field "inside" — still
    // a valid, deterministic, empty result.
    for threshold in [0.0, -1.0, 0.5] {
        let mesh = generate(8, &[], threshold).unwrap();
        assert!(mesh.is_empty());
        assert_buffer_invariants(&mesh);
    }
}

#[test]
fn zero_resolution_is_rejected() {
    assert_eq!(
        generate(0, &centered_ball(), 0.3).unwrap_err(),
        MarchingCubesError::InvalidResolution
    );
}

#[test]
fn non_positive_radius_is_rejected_at_construction() {
    assert_eq!(
        Metaball::new(0.5, 0.5, 0.5, 0.0, 1.0).unwrap_err(),
        MarchingCubesError::InvalidMetaball
    );
    assert_eq!(
        Metaball::new(0.5, 0.5, 0.5, -0.1, 1.0).unwrap_err(),
        MarchingCubesError::InvalidMetaball
    );
}

#[test]
fn single_ball_produces_a_bounded_spherical_surface() {
    let threshold = 0.3_f32;
    let radius = 0.45_f32;
    let mesh = generate(32, &centered_ball(), threshold).unwrap();
    assert!(mesh.triangle_count() > 0);
    assert_buffer_invariants(&mesh);

    // The iso-surface of (1 - d²)³ = threshold sits at a fixed distance from
    // the center; every vertex must lie near it (well within the radius).
    let iso_distance = radius * (1.0 - threshold.cbrt()).sqrt();
    let tolerance = 2.0 / 32.0;
    for v in mesh.vertices.chunks_exact(3) {
        let distance =
            ((v[0] - 0.5).powi(2) + (v[1] - 0.5).powi(2) + (v[2] - 0.5).powi(2)).sqrt();
        assert!(distance < radius + tolerance);
        assert!(
            (distance - iso_distance).abs() < tolerance,
            "vertex at distance {distance}, iso-surface at {iso_distance}"
        );
    }
}

#[test]
fn normals_are_unit_length() {
    let mesh = generate(16, &centered_ball(), 0.3).unwrap();
    for n in mesh.normals.chunks_exact(3) {
        let norm = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "normal of length {norm}");
    }
}

#[test]
fn triangle_winding_agrees_with_gradient_normals() {
    // The face normal implied by each triangle's winding must point the same
    // way as the gradient-derived vertex normals, or back-face culling would
    // hide the surface.
    let mesh = generate(32, &centered_ball(), 0.3).unwrap();
    assert!(mesh.triangle_count() > 0);

    let vertex = |i: u32| -> [f32; 3] {
        let at = i as usize * 3;
        [mesh.vertices[at], mesh.vertices[at + 1], mesh.vertices[at + 2]]
    };
    let normal = |i: u32| -> [f32; 3] {
        let at = i as usize * 3;
        [mesh.normals[at], mesh.normals[at + 1], mesh.normals[at + 2]]
    };

    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2]));
        let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let bc = [c[0] - b[0], c[1] - b[1], c[2] - b[2]];
        let face = [
            ab[1] * bc[2] - ab[2] * bc[1],
            ab[2] * bc[0] - ab[0] * bc[2],
            ab[0] * bc[1] - ab[1] * bc[0],
        ];
        let area = (face[0] * face[0] + face[1] * face[1] + face[2] * face[2]).sqrt();
        if area < 1e-12 {
            continue;
        }

        let n = normal(tri[0]);
        let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
        assert!(dot > 0.0, "triangle winding opposes its vertex normals");
    }
}

#[test]
fn triangle_count_is_monotone_in_resolution() {
    let metaballs = centered_ball();
    let mut previous = 0;
    for resolution in [4, 8, 16, 32] {
        let mesh = generate(resolution, &metaballs, 0.3).unwrap();
        assert!(
            mesh.triangle_count() >= previous,
            "triangle count dropped at resolution {resolution}"
        );
        previous = mesh.triangle_count();
    }
}

#[test]
fn identical_inputs_give_identical_buffers() {
    let metaballs = vec![
        Metaball::new(0.4, 0.45, 0.5, 0.3, 1.0).unwrap(),
        Metaball::new(0.6, 0.55, 0.5, 0.25, 0.7).unwrap(),
    ];
    let a = generate(24, &metaballs, 0.2).unwrap();
    let b = generate(24, &metaballs, 0.2).unwrap();
    assert_eq!(a, b);
}

#[test]
fn default_configuration_is_deterministic_and_non_empty() {
    let a = generate_default(16).unwrap();
    let b = generate_default(16).unwrap();
    assert!(a.triangle_count() > 0);
    assert_eq!(a, b);
}

#[test]
fn disjoint_balls_form_two_connected_components() {
    // Supports [0.05, 0.45] and [0.55, 0.95] on x — no overlap.
    let metaballs = vec![
        Metaball::new(0.25, 0.5, 0.5, 0.2, 1.0).unwrap(),
        Metaball::new(0.75, 0.5, 0.5, 0.2, 1.0).unwrap(),
    ];
    let mesh = generate(32, &metaballs, 0.3).unwrap();
    assert!(mesh.triangle_count() > 0);
    assert_eq!(connected_components(&mesh), 2);
}

#[test]
fn negative_influence_carves_material_away() {
    let ball = Metaball::new(0.5, 0.5, 0.5, 0.4, 1.0).unwrap();
    let hole = Metaball::new(0.5, 0.5, 0.5, 0.4, -1.0).unwrap();
    let solid = generate(16, &[ball], 0.3).unwrap();
    let cancelled = generate(16, &[ball, hole], 0.3).unwrap();
    assert!(solid.triangle_count() > 0);
    assert!(cancelled.is_empty());
}

/// Counts connected components of the triangle graph, welding duplicated
/// vertices by quantized position (vertices are intentionally not
/// deduplicated across cubes).
fn connected_components(mesh: &MeshBuffers) -> usize {
    let quantize = |v: &[f32]| -> (i64, i64, i64) {
        (
            (v[0] * 1e5).round() as i64,
            (v[1] * 1e5).round() as i64,
            (v[2] * 1e5).round() as i64,
        )
    };

    let mut ids: HashMap<(i64, i64, i64), usize> = HashMap::new();
    let mut welded = Vec::with_capacity(mesh.vertex_count());
    for v in mesh.vertices.chunks_exact(3) {
        let next = ids.len();
        welded.push(*ids.entry(quantize(v)).or_insert(next));
    }

    let mut parent: Vec<usize> = (0..ids.len()).collect();
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for tri in mesh.indices.chunks_exact(3) {
        let a = welded[tri[0] as usize];
        for &other in &tri[1..] {
            let ra = find(&mut parent, a);
            let rb = find(&mut parent, welded[other as usize]);
            parent[ra] = rb;
        }
    }

    (0..parent.len())
        .filter(|&i| find(&mut parent, i) == i)
        .count()
}
