pub mod models;
pub mod services;

pub use models::ShippingRate;
pub use services::ShippingCalculator;
