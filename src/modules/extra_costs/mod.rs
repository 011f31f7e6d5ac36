pub mod models;
pub mod services;

pub use models::{ExtraCost, ExtraCostKind};
pub use services::ExtraCostCalculator;
