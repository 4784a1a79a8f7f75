use crate::{
    error::{MarchingCubesError, Result},
    types::{Point, Value, Vector},
};

/// A soft spherical blob contributing to the scalar field.
///
/// The contribution at a point `p` is a compactly-supported polynomial
/// falloff of the normalized distance `d = |p - center| / radius`:
///
/// ```text
/// f(p) = influence * (1 - d²)³   for d < 1
///      = 0                       for d ≥ 1
/// ```
///
/// Value and first derivative both vanish at `d = 1`, so overlapping balls
/// merge into a smooth surface with smooth normals. `influence` may be
/// negative to carve material away.
///
/// Plain `Copy` value carrier: construct it, pass it to
/// [`generate`](crate::extract::generate), done. The extractor never retains
/// metaballs beyond a single call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metaball {
    center: Point,
    radius: Value,
    influence: Value,
}

impl Metaball {
    /// Creates a metaball at `(x, y, z)` in the grid's `[0, 1]³` domain.
    ///
    /// Returns [`MarchingCubesError::InvalidMetaball`] unless `radius` is
    /// finite and strictly positive — every `Metaball` that exists can be
    /// evaluated without risk of dividing by zero.
    pub fn new(x: Value, y: Value, z: Value, radius: Value, influence: Value) -> Result<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(MarchingCubesError::InvalidMetaball);
        }
        Ok(Self {
            center: Point::new(x, y, z),
            radius,
            influence,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> Value {
        self.radius
    }

    pub fn influence(&self) -> Value {
        self.influence
    }

    /// Field contribution of this ball at `point`. Zero outside the support.
    #[inline]
    pub fn contribution(&self, point: Point) -> Value {
        let offset = point - self.center;
        // s = d² — the falloff is a polynomial in d², no sqrt needed.
        let s = offset.norm_squared() / (self.radius * self.radius);
        if s >= 1.0 {
            return 0.0;
        }
        let k = 1.0 - s;
        self.influence * k * k * k
    }

    /// Analytic gradient of [`contribution`](Metaball::contribution) at `point`.
    ///
    /// ```text
    /// ∇f = -6 · influence · (1 - d²)² · (p - c) / radius²
    /// ```
    ///
    /// Points toward increasing field, i.e. inward for positive influence.
    #[inline]
    pub fn gradient(&self, point: Point) -> Vector {
        let offset = point - self.center;
        let r2 = self.radius * self.radius;
        let s = offset.norm_squared() / r2;
        if s >= 1.0 {
            return Vector::zeros();
        }
        let k = 1.0 - s;
        offset * (-6.0 * self.influence * k * k / r2)
    }
}

/// Summed field value at `point` — simple superposition over all balls.
#[inline]
pub fn field_at(point: Point, metaballs: &[Metaball]) -> Value {
    metaballs.iter().map(|ball| ball.contribution(point)).sum()
}

/// Summed analytic field gradient at `point`.
#[inline]
pub fn gradient_at(point: Point, metaballs: &[Metaball]) -> Vector {
    metaballs
        .iter()
        .map(|ball| ball.gradient(point))
        .sum::<Vector>()
}
