pub mod models;
pub mod services;

pub use models::{Discount, DiscountConditions, DiscountKind, ShippingDiscountBasis};
pub use services::DiscountCalculator;
