//! Coordinate operations: factories, their registry, and the operation type.

pub mod factory;
pub mod property;
pub mod registry;

use std::sync::Arc;

use crate::foundation::error::{TellusError, TellusResult};
use crate::model::ReferenceSystem;
use crate::transform::Transform;

pub use factory::{CoordinateOperationFactory, OperationLookup};
pub use property::{PropertyOperationFactory, parse_transform_kind_params};
pub use registry::OperationRegistry;

#[derive(Clone, Debug)]
/// A named, directional transform bound to a specific source/target pair.
///
/// Built by a [`CoordinateOperationFactory`]; immutable, and shared behind
/// `Arc` when cached by the registry.
pub struct Operation {
    name: String,
    source: Arc<ReferenceSystem>,
    target: Arc<ReferenceSystem>,
    transform: Transform,
    provenance: Option<String>,
}

impl Operation {
    /// Build an operation, checking that the transform's dimensions match
    /// the two reference systems.
    pub fn new(
        name: impl Into<String>,
        source: Arc<ReferenceSystem>,
        target: Arc<ReferenceSystem>,
        transform: Transform,
        provenance: Option<String>,
    ) -> TellusResult<Self> {
        if transform.source_dim() != source.dimension() {
            return Err(TellusError::dimension_mismatch(format!(
                "transform expects {} ordinates but '{}' has {} axes",
                transform.source_dim(),
                source.name(),
                source.dimension()
            )));
        }
        if transform.target_dim() != target.dimension() {
            return Err(TellusError::dimension_mismatch(format!(
                "transform produces {} ordinates but '{}' has {} axes",
                transform.target_dim(),
                target.name(),
                target.dimension()
            )));
        }
        Ok(Self {
            name: name.into(),
            source,
            target,
            transform,
            provenance,
        })
    }

    /// Human-readable operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The system coordinates are converted from.
    pub fn source(&self) -> &Arc<ReferenceSystem> {
        &self.source
    }

    /// The system coordinates are converted to.
    pub fn target(&self) -> &Arc<ReferenceSystem> {
        &self.target
    }

    /// The transform realizing this operation.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Name of the factory that produced this operation, when known.
    pub fn provenance(&self) -> Option<&str> {
        self.provenance.as_deref()
    }

    /// The reverse operation, when the transform is invertible.
    pub fn inverse(&self) -> TellusResult<Self> {
        Self::new(
            format!("Inverse of {}", self.name),
            Arc::clone(&self.target),
            Arc::clone(&self.source),
            self.transform.inverse()?,
            self.provenance.clone(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/operation/operation.rs"]
mod tests;
