pub mod comparison;
pub mod config;
pub mod consortium;
pub mod error;
pub mod financing;
pub mod format;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use error::ConsorcioError;
pub use types::*;

/// Standard result type for all consórcio operations
pub type ConsorcioResult<T> = Result<T, ConsorcioError>;
