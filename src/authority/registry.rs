use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::authority::factory::AuthorityFactory;
use crate::foundation::core::{AuthorityCode, CodeCategory};
use crate::foundation::error::{TellusError, TellusResult};
use crate::model::ReferenceSystem;
use crate::registry::providers::ProviderList;
use crate::registry::source::ProviderSource;

/// Priority-ordered collection of [`AuthorityFactory`] instances.
///
/// `decode` walks the factories serving the code's authority from highest to
/// lowest priority and returns the first successful resolution; per-factory
/// failures are logged and skipped. Provider sources registered through
/// [`AuthorityRegistry::add_source`] are re-queried on every
/// [`AuthorityRegistry::reset_all`].
///
/// Registries are plain values: embedders and tests build private instances
/// instead of sharing a process-wide singleton.
#[derive(Debug, Default)]
pub struct AuthorityRegistry {
    providers: ProviderList<dyn AuthorityFactory>,
    sources: RwLock<Vec<Arc<dyn ProviderSource>>>,
}

impl AuthorityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. It is tried according to its declared priority;
    /// among equal priorities, earlier registrations win.
    pub fn add_provider(&self, factory: Arc<dyn AuthorityFactory>) {
        self.providers.add(factory);
    }

    /// Remove a previously registered factory by identity.
    pub fn remove_provider(&self, factory: &Arc<dyn AuthorityFactory>) -> bool {
        self.providers.remove(factory)
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

    /// Drop all providers and sources.
    pub fn dispose(&self) {
        self.sources.write().clear();
        self.providers.clear();
    }

    fn requery_sources(&self) {
        let sources = self.sources.read().clone();
        let dynamic = sources
            .iter()
            .flat_map(|s| s.authority_factories())
            .collect();
        self.providers.set_dynamic(dynamic);
    }

    /// Number of currently registered factories, dynamic ones included.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Resolve a qualified `AUTHORITY:CODE` string to a reference system.
    #[tracing::instrument(skip(self))]
    pub fn decode(&self, code: &str) -> TellusResult<Arc<ReferenceSystem>> {
        self.decode_code(&AuthorityCode::parse(code)?)
    }

    /// Resolve an already-parsed authority code.
    pub fn decode_code(&self, code: &AuthorityCode) -> TellusResult<Arc<ReferenceSystem>> {
        let snapshot = self.providers.snapshot();
        let mut last_error: Option<TellusError> = None;

        for factory in snapshot
            .iter()
            .filter(|f| f.authority() == code.authority)
        {
            match factory.resolve(code) {
                Ok(rs) => return Ok(rs),
                Err(e) => {
                    tracing::debug!(
                        authority = factory.authority(),
                        error = %e,
                        "factory failed, falling through"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => TellusError::no_such_code(format!("{code}: {e}")),
            None => TellusError::no_such_code(format!(
                "no factory registered for authority {}",
                code.authority
            )),
        })
    }

    /// Union of authority names across all registered factories.
    pub fn supported_authorities(&self) -> BTreeSet<String> {
        self.providers
            .snapshot()
            .iter()
            .map(|f| f.authority().to_string())
            .collect()
    }

    /// Union of qualified codes across all registered factories.
    pub fn supported_codes(&self, category: CodeCategory) -> BTreeSet<String> {
        self.providers
            .snapshot()
            .iter()
            .flat_map(|f| f.supported_codes(category))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authority/registry.rs"]
mod tests;
