//! Error types for magpend.
//!
//! Valid numeric inputs never fail inside the engine. The only rejected
//! requests are grid geometries with a non-positive side and parameter
//! values that break the force model's positive denominators.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Grid geometry with a non-positive dimension. Nothing is allocated.
    InvalidGeometry { width: i64, height: i64 },
    /// Parameter value outside its accepted range.
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry { width, height } => {
                write!(f, "Invalid grid geometry {}x{}: both sides must be positive", width, height)
            }
            Error::InvalidParameter { name, value } => {
                write!(f, "Invalid value for parameter `{}`: {}", name, value)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
