use std::collections::BTreeSet;
use std::sync::Arc;

use crate::authority::{AuthorityFactory, AuthorityRegistry};
use crate::foundation::core::CodeCategory;
use crate::foundation::error::TellusResult;
use crate::model::ReferenceSystem;
use crate::operation::{CoordinateOperationFactory, Operation, OperationRegistry};
use crate::registry::source::ProviderSource;

/// Facade wiring an authority registry and an operation registry together.
///
/// This is the object embedders hold: resolve codes with
/// [`ReferencingEngine::decode`], build conversions with
/// [`ReferencingEngine::create_operation`], and register providers through
/// the hooks below. Engines are plain values with no global state; tests
/// construct private instances and inject synthetic factories.
#[derive(Debug, Default)]
pub struct ReferencingEngine {
    authorities: Arc<AuthorityRegistry>,
    operations: Arc<OperationRegistry>,
}

impl ReferencingEngine {
    /// An engine with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// The authority registry, for direct access and injection.
    pub fn authorities(&self) -> &Arc<AuthorityRegistry> {
        &self.authorities
    }

    /// The operation registry, for direct access and injection.
    pub fn operations(&self) -> &Arc<OperationRegistry> {
        &self.operations
    }

    /// Resolve a qualified `AUTHORITY:CODE` string to a reference system.
    pub fn decode(&self, code: &str) -> TellusResult<Arc<ReferenceSystem>> {
        self.authorities.decode(code)
    }

    /// Resolve both codes, then find or synthesize an operation between
    /// them.
    #[tracing::instrument(skip(self))]
    pub fn create_operation(
        &self,
        source_code: &str,
        target_code: &str,
    ) -> TellusResult<Arc<Operation>> {
        let source = self.authorities.decode(source_code)?;
        let target = self.authorities.decode(target_code)?;
        self.operations.create_operation(&source, &target)
    }

    /// Find or synthesize an operation between two already-resolved systems.
    pub fn create_operation_between(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
    ) -> TellusResult<Arc<Operation>> {
        self.operations.create_operation(source, target)
    }

    /// Authority names understood by at least one registered factory.
    pub fn supported_authorities(&self) -> BTreeSet<String> {
        self.authorities.supported_authorities()
    }

    /// Qualified codes resolvable by at least one registered factory.
    pub fn supported_codes(&self, category: CodeCategory) -> BTreeSet<String> {
        self.authorities.supported_codes(category)
    }

    /// Register an authority factory.
    pub fn add_authority_factory(&self, factory: Arc<dyn AuthorityFactory>) {
        self.authorities.add_provider(factory);
    }

    /// Register a coordinate-operation factory.
    pub fn add_operation_factory(&self, factory: Arc<dyn CoordinateOperationFactory>) {
        self.operations.add_provider(factory);
    }

    /// Remove an authority factory by identity.
    pub fn remove_authority_factory(&self, factory: &Arc<dyn AuthorityFactory>) -> bool {
        self.authorities.remove_provider(factory)
    }

    /// Remove a coordinate-operation factory by identity.
    pub fn remove_operation_factory(
        &self,
        factory: &Arc<dyn CoordinateOperationFactory>,
    ) -> bool {
        self.operations.remove_provider(factory)
    }

    /// Register a dynamic provider source with both registries.
    pub fn add_source(&self, source: Arc<dyn ProviderSource>) {
        self.authorities.add_source(Arc::clone(&source));
        self.operations.add_source(source);
    }

    /// Re-query all provider sources on both registries.
    pub fn reset_all(&self) {
        self.authorities.reset_all();
        self.operations.reset_all();
    }

    /// Drop every provider, source and cached result on both registries.
    pub fn dispose(&self) {
        self.authorities.dispose();
        self.operations.dispose();
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
