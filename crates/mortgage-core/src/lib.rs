pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage-core operations
pub type MortgageResult<T> = Result<T, MortgageError>;
