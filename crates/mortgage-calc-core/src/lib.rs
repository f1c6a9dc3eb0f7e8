pub mod error;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "format")]
pub mod format;

pub use error::MortgageCalcError;
pub use types::*;

/// Standard result type for fallible mortgage-calc operations
pub type MortgageCalcResult<T> = Result<T, MortgageCalcError>;
