pub mod error;
pub mod rounding;

pub use error::{AppError, ErrorKind, Result};
pub use rounding::round2;
