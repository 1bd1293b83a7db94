use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use crate::foundation::core::{AuthorityCode, CodeCategory};
use crate::foundation::error::TellusResult;
use crate::model::ReferenceSystem;

/// Resolves authority codes to reference-system definitions.
///
/// A factory serves exactly one authority namespace and declares a numeric
/// priority; registries try higher priorities first and break ties by
/// registration order. Implementations must be safe for concurrent lookups.
pub trait AuthorityFactory: Debug + Send + Sync {
    /// The authority namespace this factory serves, upper case (e.g. `EPSG`).
    fn authority(&self) -> &str;

    /// Lookup priority; higher values are tried first.
    fn priority(&self) -> i32;

    /// Resolve one code to a reference system.
    ///
    /// Fails with [`crate::TellusError::NoSuchAuthorityCode`] when the code's
    /// authority does not match this factory or the code is absent from its
    /// backing source, and with [`crate::TellusError::BackingStore`] when the
    /// definition exists but cannot be parsed.
    fn resolve(&self, code: &AuthorityCode) -> TellusResult<Arc<ReferenceSystem>>;

    /// Qualified codes (`AUTH:CODE`) this factory can resolve, filtered to a
    /// logical category.
    ///
    /// Category filtering is a best-effort textual classification of the
    /// backing definitions, not a structural guarantee; an enumerated code
    /// can still fail to resolve.
    fn supported_codes(&self, category: CodeCategory) -> BTreeSet<String>;
}

impl crate::registry::providers::Prioritized for dyn AuthorityFactory {
    fn provider_priority(&self) -> i32 {
        self.priority()
    }
}
