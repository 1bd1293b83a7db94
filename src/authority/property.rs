use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use crate::authority::factory::AuthorityFactory;
use crate::foundation::cache::ResultCache;
use crate::foundation::core::{AuthorityCode, CodeCategory};
use crate::foundation::error::{TellusError, TellusResult};
use crate::model::{ReferenceSystem, wkt};

/// Authority factory backed by a flat `code = definition` text table.
///
/// The whole table is read into memory once at construction; individual
/// definitions are parsed lazily on first lookup and the outcome (success or
/// failure) is cached for the lifetime of the factory, so a known-bad code
/// never gets re-parsed.
#[derive(Debug)]
pub struct PropertyAuthorityFactory {
    authority: String,
    priority: i32,
    definitions: BTreeMap<String, String>,
    cache: ResultCache<String, ReferenceSystem>,
}

impl PropertyAuthorityFactory {
    /// Load a definition table from a properties file.
    ///
    /// An unreadable file is a [`TellusError::BackingStore`] failure; a
    /// malformed line inside a readable file is only logged and skipped.
    pub fn from_file(
        authority: impl Into<String>,
        priority: i32,
        path: impl AsRef<Path>,
    ) -> TellusResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TellusError::backing_store(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_str(authority, priority, &text)
    }

    /// Build a factory from properties text already in memory.
    ///
    /// One definition per line, `code = WKT`, with `#` and `!` comment lines.
    /// The code part may be bare (`4326`) or qualified (`EPSG:4326`); a
    /// qualifier naming a different authority is rejected per-line.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(
        authority: impl Into<String>,
        priority: i32,
        text: &str,
    ) -> TellusResult<Self> {
        let authority = authority.into().trim().to_ascii_uppercase();
        if authority.is_empty() {
            return Err(TellusError::illegal_argument("authority must be non-empty"));
        }

        let mut definitions = BTreeMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, definition)) = line.split_once('=') else {
                tracing::warn!(lineno = lineno + 1, "skipping line without '='");
                continue;
            };
            let key = key.trim();
            let code = match key.split_once(':') {
                None => key,
                Some((prefix, rest)) if prefix.trim().eq_ignore_ascii_case(&authority) => {
                    rest.trim()
                }
                Some((prefix, _)) => {
                    tracing::warn!(
                        lineno = lineno + 1,
                        prefix,
                        "skipping key qualified with a foreign authority"
                    );
                    continue;
                }
            };
            if code.is_empty() {
                tracing::warn!(lineno = lineno + 1, "skipping empty code");
                continue;
            }
            definitions.insert(code.to_string(), definition.trim().to_string());
        }

        Ok(Self {
            authority,
            priority,
            definitions,
            cache: ResultCache::new(),
        })
    }

    /// Number of definitions in the backing table.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when the backing table is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn parse_definition(&self, code: &AuthorityCode, definition: &str) -> TellusResult<ReferenceSystem> {
        let mut rs = wkt::parse_reference_system(definition).map_err(|e| {
            TellusError::backing_store(format!("definition for {code} is malformed: {e}"))
        })?;
        rs.ensure_identifier(code.clone());
        Ok(rs)
    }
}

impl AuthorityFactory for PropertyAuthorityFactory {
    fn authority(&self) -> &str {
        &self.authority
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn resolve(&self, code: &AuthorityCode) -> TellusResult<Arc<ReferenceSystem>> {
        if code.authority != self.authority {
            return Err(TellusError::no_such_code(format!(
                "{code} is outside the {} namespace",
                self.authority
            )));
        }
        let Some(definition) = self.definitions.get(&code.code) else {
            return Err(TellusError::no_such_code(format!(
                "{code} is not defined in this factory"
            )));
        };
        self.cache
            .get_or_insert_with(&code.code, || self.parse_definition(code, definition))
    }

    fn supported_codes(&self, category: CodeCategory) -> BTreeSet<String> {
        self.definitions
            .iter()
            .filter(|(_, definition)| {
                // Best-effort textual classification: the backing format
                // distinguishes families by the leading keyword.
                let def = definition.trim_start().to_ascii_uppercase();
                match category {
                    CodeCategory::All => true,
                    CodeCategory::Geographic => def.starts_with("GEOGCS"),
                    CodeCategory::Projected => def.starts_with("PROJCS"),
                }
            })
            .map(|(code, _)| format!("{}:{code}", self.authority))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authority/property.rs"]
mod tests;
