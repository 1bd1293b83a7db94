/// Convenience result type used across Tellus.
pub type TellusResult<T> = Result<T, TellusError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TellusError {
    /// A syntactically valid code is absent from every registered factory.
    #[error("no such authority code: {0}")]
    NoSuchAuthorityCode(String),

    /// A factory's backing definitions could not be loaded or parsed at all.
    #[error("backing store error: {0}")]
    BackingStore(String),

    /// Transform steps with incompatible dimensions were combined.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// No registered factory could produce a path between two systems.
    #[error("operation not found: {0}")]
    OperationNotFound(String),

    /// Malformed argument passed to a helper (anchor name, axis index, ...).
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TellusError {
    /// Build a [`TellusError::NoSuchAuthorityCode`] value.
    pub fn no_such_code(msg: impl Into<String>) -> Self {
        Self::NoSuchAuthorityCode(msg.into())
    }

    /// Build a [`TellusError::BackingStore`] value.
    pub fn backing_store(msg: impl Into<String>) -> Self {
        Self::BackingStore(msg.into())
    }

    /// Build a [`TellusError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`TellusError::OperationNotFound`] value.
    pub fn operation_not_found(msg: impl Into<String>) -> Self {
        Self::OperationNotFound(msg.into())
    }

    /// Build a [`TellusError::IllegalArgument`] value.
    pub fn illegal_argument(msg: impl Into<String>) -> Self {
        Self::IllegalArgument(msg.into())
    }
}

impl Clone for TellusError {
    fn clone(&self) -> Self {
        match self {
            Self::NoSuchAuthorityCode(m) => Self::NoSuchAuthorityCode(m.clone()),
            Self::BackingStore(m) => Self::BackingStore(m.clone()),
            Self::DimensionMismatch(m) => Self::DimensionMismatch(m.clone()),
            Self::OperationNotFound(m) => Self::OperationNotFound(m.clone()),
            Self::IllegalArgument(m) => Self::IllegalArgument(m.clone()),
            // anyhow errors are not clonable; keep the rendered chain.
            Self::Other(e) => Self::BackingStore(format!("{e:#}")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
