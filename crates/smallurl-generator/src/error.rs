use thiserror::Error;

/// Errors returned when configuring a generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("upper bound must be positive, got {upper_bound}")]
    EmptyRange { upper_bound: i64 },
    #[error("bias {bias} is outside the sampling range [0, {upper_bound})")]
    BiasOutOfRange { bias: i64, upper_bound: i64 },
}
