// Cart module

pub mod models;
pub mod services;

pub use models::{CartSnapshot, LineItem, PricingResult, ShippingSelection};
pub use services::CartPricingService;
