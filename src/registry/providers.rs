use std::sync::Arc;

use parking_lot::RwLock;

/// Anything that declares a lookup priority. Higher values are tried first.
pub(crate) trait Prioritized {
    fn provider_priority(&self) -> i32;
}

/// Priority-ordered list of providers with copy-on-write snapshots.
///
/// Lookups grab an `Arc` snapshot and iterate it without holding any lock,
/// so concurrent mutation is never observed mid-iteration. Statically added
/// providers and dynamically contributed ones (from provider sources) are
/// kept apart; only static providers can be removed individually. Ordering
/// is a stable sort by descending priority over registration order, so ties
/// resolve to the first registered provider, deterministically.
#[derive(Debug)]
pub(crate) struct ProviderList<T: Prioritized + ?Sized> {
    inner: RwLock<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T: ?Sized> {
    static_providers: Vec<Arc<T>>,
    dynamic_providers: Vec<Arc<T>>,
    snapshot: Arc<Vec<Arc<T>>>,
}

impl<T: Prioritized + ?Sized> Default for ProviderList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prioritized + ?Sized> ProviderList<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                static_providers: Vec::new(),
                dynamic_providers: Vec::new(),
                snapshot: Arc::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn add(&self, provider: Arc<T>) {
        let mut inner = self.inner.write();
        inner.static_providers.push(provider);
        rebuild(&mut inner);
    }

    /// Remove a statically added provider by identity. Returns whether it
    /// was present.
    pub(crate) fn remove(&self, provider: &Arc<T>) -> bool {
        let mut inner = self.inner.write();
        let before = inner.static_providers.len();
        inner
            .static_providers
            .retain(|p| !Arc::ptr_eq(p, provider));
        let removed = inner.static_providers.len() != before;
        if removed {
            rebuild(&mut inner);
        }
        removed
    }

    /// Replace the dynamically contributed providers wholesale.
    pub(crate) fn set_dynamic(&self, providers: Vec<Arc<T>>) {
        let mut inner = self.inner.write();
        inner.dynamic_providers = providers;
        rebuild(&mut inner);
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.inner.write();
        inner.static_providers.clear();
        inner.dynamic_providers.clear();
        rebuild(&mut inner);
    }

    /// Current priority-ordered provider set. Cheap to clone, stable for the
    /// duration of an iteration.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        Arc::clone(&self.inner.read().snapshot)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.read().snapshot.len()
    }
}

fn rebuild<T: Prioritized + ?Sized>(inner: &mut Inner<T>) {
    let mut merged: Vec<Arc<T>> = inner
        .static_providers
        .iter()
        .chain(inner.dynamic_providers.iter())
        .cloned()
        .collect();
    merged.sort_by_key(|p| std::cmp::Reverse(p.provider_priority()));
    inner.snapshot = Arc::new(merged);
}

#[cfg(test)]
#[path = "../../tests/unit/registry/providers.rs"]
mod tests;
