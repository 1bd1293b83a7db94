//! Chained transforms.

use crate::foundation::error::{TellusError, TellusResult};
use crate::transform::Transform;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Two transforms applied in order, itself a [`Transform`].
///
/// Children may themselves be concatenated, so a chain of any length is a
/// binary tree of these nodes; [`ConcatenatedTransform::decompose`] flattens
/// it back into the ordered list of elementary steps.
pub struct ConcatenatedTransform {
    first: Box<Transform>,
    second: Box<Transform>,
}

impl ConcatenatedTransform {
    /// Compose `first` followed by `second`.
    ///
    /// Fails with [`TellusError::DimensionMismatch`] when `first`'s output
    /// dimension differs from `second`'s input dimension. Identity steps are
    /// elided exactly, and two adjacent matrix steps collapse into a single
    /// matrix product; everything else stays an explicit two-step node.
    pub fn create(first: Transform, second: Transform) -> TellusResult<Transform> {
        if first.target_dim() != second.source_dim() {
            return Err(TellusError::dimension_mismatch(format!(
                "cannot chain a {}->{} step into a {}->{} step",
                first.source_dim(),
                first.target_dim(),
                second.source_dim(),
                second.target_dim()
            )));
        }

        if first.is_identity() {
            return Ok(second);
        }
        if second.is_identity() {
            return Ok(first);
        }
        if let (Transform::Matrix(a), Transform::Matrix(b)) = (&first, &second) {
            return Ok(Transform::Matrix(a.then(b)?));
        }

        Ok(Transform::Concatenated(Self {
            first: Box::new(first),
            second: Box::new(second),
        }))
    }

    /// Input dimension of the whole chain.
    pub fn source_dim(&self) -> usize {
        self.first.source_dim()
    }

    /// Output dimension of the whole chain.
    pub fn target_dim(&self) -> usize {
        self.second.target_dim()
    }

    /// First child in application order.
    pub fn first(&self) -> &Transform {
        &self.first
    }

    /// Second child in application order.
    pub fn second(&self) -> &Transform {
        &self.second
    }

    /// Apply the first step, then the second.
    pub fn apply(&self, src: &[f64]) -> TellusResult<Vec<f64>> {
        let mid = self.first.apply(src)?;
        self.second.apply(&mid)
    }

    /// `create(second.inverse(), first.inverse())`.
    pub fn inverse(&self) -> TellusResult<Transform> {
        Self::create(self.second.inverse()?, self.first.inverse()?)
    }

    /// Flatten nested concatenations into the ordered list of
    /// non-concatenated steps.
    pub fn decompose(&self) -> Vec<Transform> {
        let mut steps = Vec::new();
        collect_steps(&self.first, &mut steps);
        collect_steps(&self.second, &mut steps);
        steps
    }

}

fn collect_steps(transform: &Transform, steps: &mut Vec<Transform>) {
    match transform {
        Transform::Concatenated(inner) => {
            collect_steps(&inner.first, steps);
            collect_steps(&inner.second, steps);
        }
        other => steps.push(other.clone()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/concat.rs"]
mod tests;
