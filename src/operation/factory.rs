use std::fmt::Debug;
use std::sync::Arc;

use crate::foundation::error::{TellusError, TellusResult};
use crate::model::ReferenceSystem;
use crate::operation::Operation;
use crate::operation::registry::OperationRegistry;

/// Builds coordinate operations between two resolved reference systems.
///
/// Like authority factories, operation factories declare a priority and are
/// tried in descending order by the registry, which falls through to the
/// next factory whenever one fails.
pub trait CoordinateOperationFactory: Debug + Send + Sync {
    /// Factory name, recorded as provenance on produced operations.
    fn name(&self) -> &str;

    /// Lookup priority; higher values are tried first.
    fn priority(&self) -> i32;

    /// Construct an operation converting `source` coordinates to `target`.
    ///
    /// `lookup` resolves sub-steps through the whole registry, so a factory
    /// can delegate the part of a path it does not know itself. Fails with
    /// [`TellusError::OperationNotFound`] when this factory has no path.
    fn create_operation(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
        lookup: &OperationLookup<'_>,
    ) -> TellusResult<Operation>;
}

impl crate::registry::providers::Prioritized for dyn CoordinateOperationFactory {
    fn provider_priority(&self) -> i32 {
        self.priority()
    }
}

/// Depth-tracked handle for nested operation resolution.
///
/// Handed to factories so a recursive sub-lookup goes back through the full
/// priority chain while keeping a bound on how deep fitted-system chains can
/// nest.
pub struct OperationLookup<'a> {
    registry: &'a OperationRegistry,
    depth: usize,
}

impl<'a> OperationLookup<'a> {
    pub(crate) fn new(registry: &'a OperationRegistry, depth: usize) -> Self {
        Self { registry, depth }
    }

    /// Resolve an operation for a sub-step of the caller's path.
    pub fn create_operation(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
    ) -> TellusResult<Arc<Operation>> {
        if self.depth >= OperationRegistry::MAX_NESTING_DEPTH {
            return Err(TellusError::operation_not_found(format!(
                "nested lookup from '{}' to '{}' exceeded depth {}",
                source.name(),
                target.name(),
                OperationRegistry::MAX_NESTING_DEPTH
            )));
        }
        self.registry
            .create_operation_at(source, target, self.depth + 1)
    }
}
