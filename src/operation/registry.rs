use std::sync::Arc;

use parking_lot::RwLock;

use crate::foundation::cache::ResultCache;
use crate::foundation::error::{TellusError, TellusResult};
use crate::model::ReferenceSystem;
use crate::operation::Operation;
use crate::operation::factory::{CoordinateOperationFactory, OperationLookup};
use crate::registry::providers::ProviderList;
use crate::registry::source::ProviderSource;

/// Priority-ordered collection of [`CoordinateOperationFactory`] instances.
///
/// `create_operation` walks the factories from highest to lowest priority
/// and returns the first successful result, so a higher-priority factory's
/// path always masks a lower-priority alternative for the same pair. The
/// same chain serves nested sub-lookups issued by factories themselves.
///
/// Successful and failed lookups are cached per identifier pair; the cache
/// is dropped on any provider mutation so removing a factory immediately
/// re-exposes the next candidate's path.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    providers: ProviderList<dyn CoordinateOperationFactory>,
    sources: RwLock<Vec<Arc<dyn ProviderSource>>>,
    cache: ResultCache<(String, String), Operation>,
}

impl OperationRegistry {
    /// Bound on how deep fitted-system chains may nest before a lookup is
    /// abandoned as cyclic.
    pub const MAX_NESTING_DEPTH: usize = 8;

    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. Tried according to its declared priority; among
    /// equal priorities, earlier registrations win.
    pub fn add_provider(&self, factory: Arc<dyn CoordinateOperationFactory>) {
        self.providers.add(factory);
        self.cache.clear();
    }

    /// Remove a previously registered factory by identity.
    pub fn remove_provider(&self, factory: &Arc<dyn CoordinateOperationFactory>) -> bool {
        let removed = self.providers.remove(factory);
        if removed {
            self.cache.clear();
        }
        removed
    }

    /// Register a dynamic provider source and query it immediately.
    pub fn add_source(&self, source: Arc<dyn ProviderSource>) {
        self.sources.write().push(source);
        self.requery_sources();
    }

    /// Re-query every registered provider source, replacing the dynamically
    /// contributed factory set.
    pub fn reset_all(&self) {
        self.requery_sources();
    }

    /// Drop all providers, sources and cached results.
    pub fn dispose(&self) {
        self.sources.write().clear();
        self.providers.clear();
        self.cache.clear();
    }

    fn requery_sources(&self) {
        let sources = self.sources.read().clone();
        let dynamic = sources
            .iter()
            .flat_map(|s| s.operation_factories())
            .collect();
        self.providers.set_dynamic(dynamic);
        self.cache.clear();
    }

    /// Number of currently registered factories, dynamic ones included.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Find or synthesize an operation converting `source` coordinates to
    /// `target`.
    #[tracing::instrument(skip_all, fields(source = source.name(), target = target.name()))]
    pub fn create_operation(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
    ) -> TellusResult<Arc<Operation>> {
        self.create_operation_at(source, target, 0)
    }

    pub(crate) fn create_operation_at(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
        depth: usize,
    ) -> TellusResult<Arc<Operation>> {
        // Nested lookups skip the cache: a depth-limited failure computed
        // deep in a chain must not shadow a top-level lookup of the same
        // pair.
        if depth == 0
            && let (Some(src), Some(dst)) = (source.primary_identifier(), target.primary_identifier())
        {
            let key = (src.as_qualified(), dst.as_qualified());
            return self
                .cache
                .get_or_insert_with(&key, || self.lookup_providers(source, target, depth));
        }

        self.lookup_providers(source, target, depth)
            .map(Arc::new)
    }

    fn lookup_providers(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
        depth: usize,
    ) -> TellusResult<Operation> {
        let snapshot = self.providers.snapshot();
        let lookup = OperationLookup::new(self, depth);

        for factory in snapshot.iter() {
            match factory.create_operation(source, target, &lookup) {
                Ok(op) => return Ok(op),
                Err(e) => {
                    tracing::debug!(
                        factory = factory.name(),
                        error = %e,
                        "factory failed, falling through"
                    );
                }
            }
        }

        Err(TellusError::operation_not_found(format!(
            "no coordinate path from '{}' ({}) to '{}' ({})",
            source.name(),
            describe_identity(source),
            target.name(),
            describe_identity(target),
        )))
    }
}

fn describe_identity(rs: &ReferenceSystem) -> String {
    rs.primary_identifier()
        .map_or_else(|| "unidentified".to_string(), |id| id.as_qualified())
}

#[cfg(test)]
#[path = "../../tests/unit/operation/registry.rs"]
mod tests;
