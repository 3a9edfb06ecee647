use thiserror::Error;

/// Top-level error type for the braid weave engine.
#[derive(Debug, Error)]
pub enum BraidError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric constructions.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("non-finite coordinate")]
    NonFinite,

    #[error("coordinate {0} out of range")]
    OutOfRange(f64),
}

/// Errors raised by the ribbon and weave operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A joint whose turning angle is too sharp for a stable bisector offset.
    #[error("numerically unstable joint at point {index}: {detail}")]
    NumericalInstability { index: usize, detail: String },

    /// Intermediate geometry is inconsistent. Always a bug upstream.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Errors in user-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Convenience type alias for results using [`BraidError`].
pub type Result<T> = std::result::Result<T, BraidError>;
