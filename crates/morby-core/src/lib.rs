pub mod annuity;
pub mod deal;
pub mod error;
pub mod schedule;
pub mod types;

pub use error::MorbyError;
pub use types::*;

/// Standard result type for all deal calculations
pub type MorbyResult<T> = Result<T, MorbyError>;
