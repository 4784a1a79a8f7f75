use crate::types::{Point, Value};

/// Return the interpolation factor t corresponding to iso_val.
///
/// When the endpoint values are (nearly) equal the division would blow up,
/// so the crossing is placed at the edge midpoint instead. Output is always
/// finite and within `[0, 1]`.
pub fn find_t(v0: Value, v1: Value, iso_val: Value) -> Value {
    let dv = v1 - v0;
    if dv.abs() <= Value::EPSILON {
        return 0.5;
    }
    ((iso_val - v0) / dv).clamp(0.0, 1.0)
}

// Linear interpolation
pub fn lerp(a: Value, b: Value, t: Value) -> Value {
    a + (b - a) * t
}

/// Linearly interpolate between two points by factor t.
pub fn interpolate_points(p0: Point, p1: Point, t: Value) -> Point {
    Point::new(
        lerp(p0.x, p1.x, t),
        lerp(p0.y, p1.y, t),
        lerp(p0.z, p1.z, t),
    )
}
