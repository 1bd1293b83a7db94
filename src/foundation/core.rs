use crate::foundation::error::{TellusError, TellusResult};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
/// A fully qualified authority code such as `EPSG:4326`.
///
/// The authority part is normalized to upper case; the code part is kept
/// verbatim apart from trimming. `AuthorityCode` is the lookup key used by
/// factories, registries and caches, so normalization happens once, here.
pub struct AuthorityCode {
    /// Namespace owner, e.g. `EPSG`.
    pub authority: String,
    /// Code within the authority's namespace, e.g. `4326`.
    pub code: String,
}

impl AuthorityCode {
    /// Build a code from already-split parts, normalizing both.
    pub fn new(authority: impl Into<String>, code: impl Into<String>) -> TellusResult<Self> {
        let authority = authority.into().trim().to_ascii_uppercase();
        let code = code.into().trim().to_string();
        if authority.is_empty() {
            return Err(TellusError::illegal_argument("authority must be non-empty"));
        }
        if code.is_empty() {
            return Err(TellusError::illegal_argument("code must be non-empty"));
        }
        Ok(Self { authority, code })
    }

    /// Parse a `AUTHORITY:CODE` string.
    ///
    /// The separator is the first `:`; anything after it (including further
    /// colons) belongs to the code part.
    pub fn parse(text: &str) -> TellusResult<Self> {
        let text = text.trim();
        let Some((authority, code)) = text.split_once(':') else {
            return Err(TellusError::illegal_argument(format!(
                "expected AUTHORITY:CODE, got '{text}'"
            )));
        };
        Self::new(authority, code)
    }

    /// Render the canonical `AUTHORITY:CODE` form.
    pub fn as_qualified(&self) -> String {
        format!("{}:{}", self.authority, self.code)
    }
}

impl std::fmt::Display for AuthorityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl std::str::FromStr for AuthorityCode {
    type Err = TellusError;

    fn from_str(s: &str) -> TellusResult<Self> {
        Self::parse(s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Logical category filter used by `supported_codes` introspection.
pub enum CodeCategory {
    /// Every code the factory can resolve.
    #[default]
    All,
    /// Geographic (latitude/longitude style) systems.
    Geographic,
    /// Projected (easting/northing style) systems.
    Projected,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
