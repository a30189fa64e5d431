pub mod amortization;
pub mod error;
pub mod growth;
pub mod retirement;
pub mod tax;
pub mod time_value;
pub mod types;

pub use error::FinanceError;
pub use types::*;

/// Standard result type for all engine operations
pub type FinanceResult<T> = Result<T, FinanceError>;
