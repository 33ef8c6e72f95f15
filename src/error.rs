use thiserror::Error;

/// Failures of the likelihood computations. Floating-point edge cases
/// (underflow to zero, -inf logarithms) are not errors and propagate
/// as regular values.
#[derive(Debug, Error)]
pub enum Error {

    #[error("Informed parameter {name} = {value} outside distribution domain")]
    InvalidParameter { name : &'static str, value : f64 },

    #[error("Mixture weight {0} is not a finite non-negative value")]
    InvalidWeight(f64),

    #[error("Mixture requires at least one component")]
    EmptyMixture,

    #[error("Invalid domain [{min}, {max}] with {points} steps")]
    InvalidDomain { min : f64, max : f64, points : usize },

    #[error("Prefix length {n} exceeds sample length {len}")]
    PrefixOutOfRange { n : usize, len : usize },

    #[error("Trial set is empty")]
    EmptyTrialSet,

    #[error("Sample sequence is empty")]
    EmptySample,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error)

}

pub type Result<T> = std::result::Result<T, Error>;
