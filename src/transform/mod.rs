//! Transform primitives and their composition.
//!
//! Every coordinate mapping in the engine is one closed sum type,
//! [`Transform`], dispatched by pattern matching. Composition goes through
//! [`ConcatenatedTransform::create`], which checks dimensions at construction
//! time so that `apply` never has to.

pub mod concat;
pub mod geocentric;
pub mod matrix;
pub mod pixel;

use rayon::prelude::*;

use crate::foundation::error::{TellusError, TellusResult};
use crate::foundation::math;

pub use concat::ConcatenatedTransform;
pub use geocentric::GeocentricTranslation;
pub use matrix::MatrixTransform;
pub use pixel::{PixelAnchor, pixel_anchor_adjust, pixel_anchor_adjust_axes};

/// Point count above which [`Transform::apply_batch`] fans out to rayon.
const PARALLEL_BATCH_THRESHOLD: usize = 4096;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A mapping from n-dimensional coordinate tuples to m-dimensional tuples.
pub enum Transform {
    /// The do-nothing transform over `dim` coordinates.
    Identity {
        /// Coordinate dimension.
        dim: usize,
    },
    /// Affine or projective matrix transform.
    Matrix(MatrixTransform),
    /// Three-parameter geocentric datum shift.
    GeocentricTranslation(GeocentricTranslation),
    /// Ordered pair of child transforms.
    Concatenated(ConcatenatedTransform),
}

impl Transform {
    /// Input dimension of a coordinate tuple.
    pub fn source_dim(&self) -> usize {
        match self {
            Self::Identity { dim } => *dim,
            Self::Matrix(m) => m.dim(),
            Self::GeocentricTranslation(_) => 3,
            Self::Concatenated(c) => c.source_dim(),
        }
    }

    /// Output dimension of a coordinate tuple.
    pub fn target_dim(&self) -> usize {
        match self {
            Self::Identity { dim } => *dim,
            Self::Matrix(m) => m.dim(),
            Self::GeocentricTranslation(_) => 3,
            Self::Concatenated(c) => c.target_dim(),
        }
    }

    /// Apply to a single coordinate tuple.
    ///
    /// Fails with [`TellusError::IllegalArgument`] when `src` does not match
    /// the source dimension.
    pub fn apply(&self, src: &[f64]) -> TellusResult<Vec<f64>> {
        if src.len() != self.source_dim() {
            return Err(TellusError::illegal_argument(format!(
                "expected a {}-dimensional tuple, got {} ordinates",
                self.source_dim(),
                src.len()
            )));
        }
        match self {
            Self::Identity { .. } => Ok(src.to_vec()),
            Self::Matrix(m) => {
                let mut dst = vec![0.0; m.dim()];
                m.apply(src, &mut dst)?;
                Ok(dst)
            }
            Self::GeocentricTranslation(t) => {
                let mut dst = vec![0.0; 3];
                t.apply(src, &mut dst);
                Ok(dst)
            }
            Self::Concatenated(c) => c.apply(src),
        }
    }

    /// Transform an interleaved coordinate array in place.
    ///
    /// `coords` holds consecutive tuples of the transform's dimension; large
    /// arrays are processed in parallel. Only dimension-preserving transforms
    /// can work in place.
    pub fn apply_batch(&self, coords: &mut [f64]) -> TellusResult<()> {
        let dim = self.source_dim();
        if dim != self.target_dim() {
            return Err(TellusError::illegal_argument(
                "in-place batch transform requires matching source/target dimensions",
            ));
        }
        if coords.len() % dim != 0 {
            return Err(TellusError::illegal_argument(format!(
                "coordinate array length {} is not a multiple of dimension {dim}",
                coords.len()
            )));
        }
        if self.is_identity() {
            return Ok(());
        }

        let apply_chunk = |chunk: &mut [f64]| -> TellusResult<()> {
            let out = self.apply(chunk)?;
            chunk.copy_from_slice(&out);
            Ok(())
        };

        if coords.len() / dim >= PARALLEL_BATCH_THRESHOLD {
            coords
                .par_chunks_mut(dim)
                .try_for_each(apply_chunk)
        } else {
            coords.chunks_mut(dim).try_for_each(apply_chunk)
        }
    }

    /// The inverse mapping, when every step has one.
    pub fn inverse(&self) -> TellusResult<Self> {
        match self {
            Self::Identity { dim } => Ok(Self::Identity { dim: *dim }),
            Self::Matrix(m) => Ok(Self::Matrix(m.inverse()?)),
            Self::GeocentricTranslation(t) => Ok(Self::GeocentricTranslation(t.inverse())),
            Self::Concatenated(c) => c.inverse(),
        }
    }

    /// True for transforms that are exactly (or numerically) the identity.
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Identity { .. } => true,
            Self::Matrix(m) => m.is_identity(math::EPS),
            Self::GeocentricTranslation(t) => {
                math::nearly_eq_slice(&t.parameters(), &[0.0; 3], math::EPS)
            }
            // Construction elides identity children, so a surviving
            // concatenation node is never the identity.
            Self::Concatenated(_) => false,
        }
    }

    /// The ordered, flattened list of elementary steps.
    ///
    /// Non-concatenated transforms decompose into themselves.
    pub fn steps(&self) -> Vec<Transform> {
        match self {
            Self::Concatenated(c) => c.decompose(),
            other => vec![other.clone()],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/transform.rs"]
mod tests;
