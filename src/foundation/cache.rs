use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::foundation::error::{TellusError, TellusResult};

/// Thread-safe memoization of keyed lookup results.
///
/// Failures are cached alongside successes so a known-bad key is cheap and
/// consistent on repeated lookups instead of being silently re-attempted.
/// Values are shared behind `Arc` so concurrent readers never copy them.
#[derive(Debug)]
pub(crate) struct ResultCache<K, V> {
    entries: RwLock<HashMap<K, Result<Arc<V>, TellusError>>>,
}

impl<K, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone, V> ResultCache<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached result for `key`, computing and recording it on miss.
    pub(crate) fn get_or_insert_with<F>(&self, key: &K, compute: F) -> TellusResult<Arc<V>>
    where
        F: FnOnce() -> TellusResult<V>,
    {
        if let Some(hit) = self.entries.read().get(key) {
            return hit.clone();
        }

        let computed = compute().map(Arc::new);
        // A racing writer may have inserted meanwhile; first insert wins so
        // every caller observes the same outcome for the key.
        let mut entries = self.entries.write();
        entries
            .entry(key.clone())
            .or_insert(computed)
            .clone()
    }

    pub(crate) fn clear(&self) {
        self.entries.write().clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/cache.rs"]
mod tests;
