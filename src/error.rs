use crate::parameters::expression::ExpressionError;
use crate::parameters::parameter::ParameterId;
use crate::parameters::range::RangeError;
use thiserror::Error;

/// Error types for the sourcefit-config library.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An identifier that is not present in any parameter registry.
    #[error("Missing reference: parameter {0} is not registered")]
    MissingReference(ParameterId),

    /// The column allocator returned an identifier that is already in use.
    #[error("Parameter {0} is already registered")]
    DuplicateId(ParameterId),

    /// The column allocator has no identifier left.
    #[error("No parameter identifiers left to allocate")]
    IdsExhausted,

    /// A literal initial value that is NaN or infinite.
    #[error("Initial value must be a finite number, got {0}")]
    NonFiniteValue(f64),

    /// Invalid range limits.
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// Dependent parameter formula could not be parsed or evaluated.
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// A dependent parameter was given the wrong number of argument values.
    #[error("Dependent parameter {id} expects {expected} argument values, got {got}")]
    ArityMismatch {
        id: ParameterId,
        expected: usize,
        got: usize,
    },

    /// Dependent parameters have no initial value to bind.
    #[error("Parameter {id} is dependent and has no initial value")]
    NotBindable { id: ParameterId },

    /// An output column with this name already exists.
    #[error("Output column '{0}' is already defined")]
    DuplicateOutputColumn(String),

    /// Invalid model fitting configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sourcefit-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
