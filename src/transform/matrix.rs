//! Homogeneous matrix transforms.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::foundation::error::{TellusError, TellusResult};
use crate::foundation::math;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
enum Mat {
    Dim2(DMat3),
    Dim3(DMat4),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Affine or projective transform backed by a homogeneous square matrix.
///
/// A transform over `dim` coordinates is stored as a `(dim + 1)` square
/// matrix; supported dimensions are 2 and 3. Points are extended with a
/// homogeneous `w = 1` component on apply and divided back out, so plain
/// affine matrices (last row `0 .. 0 1`) and projective matrices both work.
pub struct MatrixTransform {
    mat: Mat,
}

impl MatrixTransform {
    /// Identity matrix over `dim` coordinates.
    pub fn identity(dim: usize) -> TellusResult<Self> {
        let mat = match dim {
            2 => Mat::Dim2(DMat3::IDENTITY),
            3 => Mat::Dim3(DMat4::IDENTITY),
            other => {
                return Err(TellusError::dimension_mismatch(format!(
                    "matrix transforms support dimensions 2 and 3, got {other}"
                )));
            }
        };
        Ok(Self { mat })
    }

    /// Pure translation by `offsets` (one offset per coordinate).
    pub fn translation(offsets: &[f64]) -> TellusResult<Self> {
        let mut m = Self::identity(offsets.len())?;
        match &mut m.mat {
            Mat::Dim2(m) => {
                m.z_axis.x = offsets[0];
                m.z_axis.y = offsets[1];
            }
            Mat::Dim3(m) => {
                m.w_axis.x = offsets[0];
                m.w_axis.y = offsets[1];
                m.w_axis.z = offsets[2];
            }
        }
        Ok(m)
    }

    /// Build from `(dim + 1)^2` row-major elements.
    pub fn from_row_major(dim: usize, elements: &[f64]) -> TellusResult<Self> {
        let side = dim + 1;
        if elements.len() != side * side {
            return Err(TellusError::dimension_mismatch(format!(
                "expected {} elements for a dimension-{dim} matrix, got {}",
                side * side,
                elements.len()
            )));
        }
        let mat = match dim {
            2 => {
                let mut arr = [0.0; 9];
                arr.copy_from_slice(elements);
                // from_cols_array reads column-major; transposing turns our
                // row-major input into the intended matrix.
                Mat::Dim2(DMat3::from_cols_array(&arr).transpose())
            }
            3 => {
                let mut arr = [0.0; 16];
                arr.copy_from_slice(elements);
                Mat::Dim3(DMat4::from_cols_array(&arr).transpose())
            }
            other => {
                return Err(TellusError::dimension_mismatch(format!(
                    "matrix transforms support dimensions 2 and 3, got {other}"
                )));
            }
        };
        Ok(Self { mat })
    }

    /// Coordinate dimension (2 or 3).
    pub fn dim(&self) -> usize {
        match self.mat {
            Mat::Dim2(_) => 2,
            Mat::Dim3(_) => 3,
        }
    }

    /// Row-major elements of the backing `(dim + 1)` square matrix.
    pub fn to_row_major(&self) -> Vec<f64> {
        match self.mat {
            Mat::Dim2(m) => m.transpose().to_cols_array().to_vec(),
            Mat::Dim3(m) => m.transpose().to_cols_array().to_vec(),
        }
    }

    /// Apply to one coordinate tuple, writing into `dst`.
    pub fn apply(&self, src: &[f64], dst: &mut [f64]) -> TellusResult<()> {
        debug_assert_eq!(src.len(), self.dim());
        debug_assert_eq!(dst.len(), self.dim());
        match self.mat {
            Mat::Dim2(m) => {
                let v = m * DVec3::new(src[0], src[1], 1.0);
                if v.z == 0.0 {
                    return Err(TellusError::illegal_argument(
                        "projective transform maps point to infinity",
                    ));
                }
                dst[0] = v.x / v.z;
                dst[1] = v.y / v.z;
            }
            Mat::Dim3(m) => {
                let v = m * DVec4::new(src[0], src[1], src[2], 1.0);
                if v.w == 0.0 {
                    return Err(TellusError::illegal_argument(
                        "projective transform maps point to infinity",
                    ));
                }
                dst[0] = v.x / v.w;
                dst[1] = v.y / v.w;
                dst[2] = v.z / v.w;
            }
        }
        Ok(())
    }

    /// Matrix of `self` followed by `next`, collapsed into one product.
    pub fn then(&self, next: &Self) -> TellusResult<Self> {
        if self.dim() != next.dim() {
            return Err(TellusError::dimension_mismatch(format!(
                "cannot collapse a dimension-{} matrix into a dimension-{} matrix",
                self.dim(),
                next.dim()
            )));
        }
        let mat = match (self.mat, next.mat) {
            (Mat::Dim2(a), Mat::Dim2(b)) => Mat::Dim2(b * a),
            (Mat::Dim3(a), Mat::Dim3(b)) => Mat::Dim3(b * a),
            _ => unreachable!("dimension checked above"),
        };
        Ok(Self { mat })
    }

    /// Inverse matrix; fails on a singular matrix.
    pub fn inverse(&self) -> TellusResult<Self> {
        let singular = match self.mat {
            Mat::Dim2(m) => m.determinant().abs() < f64::EPSILON,
            Mat::Dim3(m) => m.determinant().abs() < f64::EPSILON,
        };
        if singular {
            return Err(TellusError::illegal_argument(
                "singular matrix has no inverse",
            ));
        }
        let mat = match self.mat {
            Mat::Dim2(m) => Mat::Dim2(m.inverse()),
            Mat::Dim3(m) => Mat::Dim3(m.inverse()),
        };
        Ok(Self { mat })
    }

    /// True when every element is within `tol` of the identity matrix.
    pub fn is_identity(&self, tol: f64) -> bool {
        let (elements, side) = (self.to_row_major(), self.dim() + 1);
        elements.iter().enumerate().all(|(i, &e)| {
            let expected = if i / side == i % side { 1.0 } else { 0.0 };
            math::nearly_eq(e, expected, tol)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
