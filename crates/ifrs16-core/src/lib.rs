pub mod engine;
pub mod error;
pub mod inputs;
pub mod journal;
pub mod liability;
pub mod modification;
pub mod rates;
pub mod schedule;
pub mod term;
pub mod types;

pub use engine::{calculate, CalculationResult};
pub use error::LeaseError;
pub use types::*;

/// Standard result type for all lease-engine operations
pub type LeaseResult<T> = Result<T, LeaseError>;
