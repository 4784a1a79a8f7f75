use marching_metaballs::{Metaball, generate, generate_default};

fn main() -> marching_metaballs::Result<()> {
    const RESOLUTION: u32 = 48;

    let mesh = generate_default(RESOLUTION)?;
    println!(
        "default configuration at resolution {RESOLUTION}: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count(),
    );

    // A ball carved by a negative-influence ball.
    let metaballs = [
        Metaball::new(0.5, 0.5, 0.5, 0.45, 1.0)?,
        Metaball::new(0.62, 0.5, 0.5, 0.25, -0.8)?,
    ];
    let mesh = generate(RESOLUTION, &metaballs, 0.2)?;
    println!(
        "carved ball at resolution {RESOLUTION}: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count(),
    );

    Ok(())
}
