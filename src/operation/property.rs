use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::authority::AuthorityRegistry;
use crate::foundation::core::AuthorityCode;
use crate::foundation::error::{TellusError, TellusResult};
use crate::model::ReferenceSystem;
use crate::operation::factory::{CoordinateOperationFactory, OperationLookup};
use crate::operation::Operation;
use crate::transform::{ConcatenatedTransform, GeocentricTranslation, MatrixTransform, Transform};

/// Operation factory backed by a flat table of explicit transform entries.
///
/// Each line maps an ordered pair of codes to a transform record:
///
/// ```text
/// TEST:1234->EPSG:4326 = {"kind": "geocentric_translation", "params": {"dx": 1.0, "dy": 2.0, "dz": 3.0}}
/// ```
///
/// Only one direction needs to be stored; the reverse pair is answered by
/// inverting the stored transform. Systems with equal definitions get the
/// identity transform without consulting the table, and a fitted source
/// system is routed through its base system by delegating the remaining leg
/// to the whole registry.
#[derive(Debug)]
pub struct PropertyOperationFactory {
    name: String,
    priority: i32,
    authorities: Arc<AuthorityRegistry>,
    entries: BTreeMap<(String, String), Result<Transform, TellusError>>,
}

impl PropertyOperationFactory {
    /// Load a transform table from a properties file.
    pub fn from_file(
        name: impl Into<String>,
        priority: i32,
        authorities: Arc<AuthorityRegistry>,
        path: impl AsRef<Path>,
    ) -> TellusResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TellusError::backing_store(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_str(name, priority, authorities, &text)
    }

    /// Build a factory from properties text already in memory.
    ///
    /// Malformed lines are logged and skipped; a malformed transform record
    /// under a well-formed key is kept as a per-pair failure so lookups of
    /// that pair report what is wrong instead of pretending the pair is
    /// undefined.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(
        name: impl Into<String>,
        priority: i32,
        authorities: Arc<AuthorityRegistry>,
        text: &str,
    ) -> TellusResult<Self> {
        let mut entries = BTreeMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, record)) = line.split_once('=') else {
                tracing::warn!(lineno = lineno + 1, "skipping line without '='");
                continue;
            };
            let Some((src, dst)) = key.split_once("->") else {
                tracing::warn!(lineno = lineno + 1, "skipping key without '->'");
                continue;
            };
            let (src, dst) = match (AuthorityCode::parse(src), AuthorityCode::parse(dst)) {
                (Ok(s), Ok(d)) => (s.as_qualified(), d.as_qualified()),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(lineno = lineno + 1, error = %e, "skipping malformed pair key");
                    continue;
                }
            };
            let parsed = parse_transform_record(record.trim()).map_err(|e| {
                tracing::warn!(lineno = lineno + 1, error = %e, "keeping malformed record as failure");
                TellusError::backing_store(format!(
                    "transform record for {src}->{dst} is malformed: {e}"
                ))
            });
            entries.insert((src, dst), parsed);
        }

        Ok(Self {
            name: name.into(),
            priority,
            authorities,
            entries,
        })
    }

    /// Number of entries in the backing table, failures included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the backing table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First stored transform found for any identifier pair of the two
    /// systems, in the given direction.
    fn stored_transform(
        &self,
        source: &ReferenceSystem,
        target: &ReferenceSystem,
    ) -> Option<Result<Transform, TellusError>> {
        for src in source.identifiers() {
            for dst in target.identifiers() {
                if let Some(entry) = self
                    .entries
                    .get(&(src.as_qualified(), dst.as_qualified()))
                {
                    return Some(entry.clone());
                }
            }
        }
        None
    }
}

impl CoordinateOperationFactory for PropertyOperationFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn create_operation(
        &self,
        source: &Arc<ReferenceSystem>,
        target: &Arc<ReferenceSystem>,
        lookup: &OperationLookup<'_>,
    ) -> TellusResult<Operation> {
        let provenance = Some(self.name.clone());

        // Equal definitions convert through the identity, no table needed.
        if source.is_equivalent_to(target) {
            return Operation::new(
                format!("Identity ({})", source.name()),
                Arc::clone(source),
                Arc::clone(target),
                Transform::Identity {
                    dim: source.dimension(),
                },
                provenance,
            );
        }

        // Explicit entry in the stored direction.
        if let Some(entry) = self.stored_transform(source, target) {
            return Operation::new(
                format!("{} -> {}", source.name(), target.name()),
                Arc::clone(source),
                Arc::clone(target),
                entry?,
                provenance,
            );
        }

        // Reverse entry, inverted algebraically.
        if let Some(entry) = self.stored_transform(target, source) {
            return Operation::new(
                format!("{} -> {}", source.name(), target.name()),
                Arc::clone(source),
                Arc::clone(target),
                entry?.inverse()?,
                provenance,
            );
        }

        // A fitted source converts to its base system first; the rest of the
        // path is delegated back to the registry so another factory can
        // contribute the base-to-target leg.
        if let Some(anchor) = source.anchor() {
            let base = self.authorities.decode_code(&anchor.base)?;
            let base_to_target = lookup.create_operation(&base, target)?;
            let transform = ConcatenatedTransform::create(
                anchor.to_base.clone(),
                base_to_target.transform().clone(),
            )?;
            return Operation::new(
                format!("{} -> {}", source.name(), target.name()),
                Arc::clone(source),
                Arc::clone(target),
                transform,
                provenance,
            );
        }

        // A fitted target is handled by building the opposite direction and
        // inverting it. The roles swap once at most, so this cannot recurse
        // onto itself.
        if target.anchor().is_some() {
            let reverse = self.create_operation(target, source, lookup)?;
            return reverse.inverse();
        }

        Err(TellusError::operation_not_found(format!(
            "no path from '{}' to '{}' in factory {}",
            source.name(),
            target.name(),
            self.name
        )))
    }
}

fn parse_transform_record(record: &str) -> TellusResult<Transform> {
    let value: serde_json::Value = serde_json::from_str(record)
        .map_err(|e| TellusError::illegal_argument(format!("record is not valid JSON: {e}")))?;
    let kind = value
        .get("kind")
        .and_then(|k| k.as_str())
        .ok_or_else(|| TellusError::illegal_argument("record is missing its 'kind'"))?;
    let params = value.get("params").unwrap_or(&serde_json::Value::Null);

    parse_transform_kind_params(kind, params)
}

/// Parse a `kind` + JSON `params` pair into a transform.
pub fn parse_transform_kind_params(
    kind: &str,
    params: &serde_json::Value,
) -> TellusResult<Transform> {
    let kind = kind.trim().to_ascii_lowercase();
    match kind.as_str() {
        "identity" => {
            let dim = param_u64(params, "dim")?.ok_or_else(|| {
                TellusError::illegal_argument("identity requires a 'dim' parameter")
            })?;
            if dim == 0 {
                return Err(TellusError::illegal_argument("identity dim must be > 0"));
            }
            Ok(Transform::Identity { dim: dim as usize })
        }
        "geocentric_translation" => {
            let dx = require_f64(params, "dx")?;
            let dy = require_f64(params, "dy")?;
            let dz = require_f64(params, "dz")?;
            Ok(Transform::GeocentricTranslation(GeocentricTranslation::new(
                dx, dy, dz,
            )))
        }
        "affine" => {
            let dim = param_u64(params, "dim")?
                .ok_or_else(|| TellusError::illegal_argument("affine requires a 'dim' parameter"))?
                as usize;
            let elements = params
                .get("matrix")
                .and_then(|m| m.as_array())
                .ok_or_else(|| {
                    TellusError::illegal_argument("affine requires a 'matrix' array parameter")
                })?
                .iter()
                .map(|v| {
                    v.as_f64().ok_or_else(|| {
                        TellusError::illegal_argument("affine matrix entries must be numbers")
                    })
                })
                .collect::<TellusResult<Vec<f64>>>()?;
            Ok(Transform::Matrix(MatrixTransform::from_row_major(
                dim, &elements,
            )?))
        }
        other => Err(TellusError::illegal_argument(format!(
            "unknown transform kind '{other}'"
        ))),
    }
}

fn param_u64(params: &serde_json::Value, key: &str) -> TellusResult<Option<u64>> {
    match params.get(key) {
        None => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            TellusError::illegal_argument(format!("parameter '{key}' must be a non-negative integer"))
        }),
    }
}

fn require_f64(params: &serde_json::Value, key: &str) -> TellusResult<f64> {
    params
        .get(key)
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            TellusError::illegal_argument(format!("parameter '{key}' must be a finite number"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/operation/property.rs"]
mod tests;
