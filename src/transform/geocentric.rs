//! Geocentric datum shifts.

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Three-parameter datum shift applied in earth-centered coordinates.
///
/// The classic approximation of a datum change: a constant offset added to
/// geocentric X/Y/Z. Exactly invertible by negating the parameters.
pub struct GeocentricTranslation {
    /// Offset along geocentric X in metres.
    pub dx: f64,
    /// Offset along geocentric Y in metres.
    pub dy: f64,
    /// Offset along geocentric Z in metres.
    pub dz: f64,
}

impl GeocentricTranslation {
    /// Build a translation from its three parameters.
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    /// The parameters as `[dx, dy, dz]`.
    pub fn parameters(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Apply to one 3-dimensional tuple, writing into `dst`.
    pub fn apply(&self, src: &[f64], dst: &mut [f64]) {
        debug_assert_eq!(src.len(), 3);
        debug_assert_eq!(dst.len(), 3);
        dst[0] = src[0] + self.dx;
        dst[1] = src[1] + self.dy;
        dst[2] = src[2] + self.dz;
    }

    /// The algebraic inverse: all parameters negated.
    pub fn inverse(&self) -> Self {
        Self::new(-self.dx, -self.dy, -self.dz)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/geocentric.rs"]
mod tests;
