//! Bandwidth Core - Fundamental types
//!
//! This crate provides the core types shared by the converter crates:
//! - `Precision`: Decimal places used when formatting (1..=10)
//! - `InputError`: Structured validation errors with a stable kind tag

mod error;
mod precision;

pub use error::{InputError, ErrorKind, codes};
pub use precision::Precision;

/// Values closer than this to an integer are accepted by integer-only units
pub const INTEGRAL_TOLERANCE: f64 = 1e-9;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Precision, InputError, ErrorKind};
    pub use crate::error::codes;
}
