//! Cart Pricing Engine
//!
//! Computes shopping-cart pricing: subtotal, tax, shipping, discounts,
//! extra costs and total, from an immutable cart snapshot plus an
//! explicit pricing configuration. The engine is pure computation: no
//! I/O, no ambient state, no caches shared across calls.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use config::{DiscountPolicy, PricingConfig, ShippingMethodConfig, ZoneTaxConfig};
pub use core::{AppError, Result};
pub use modules::cart::{CartPricingService, CartSnapshot, LineItem, PricingResult, ShippingSelection};
pub use modules::discounts::{Discount, DiscountConditions, DiscountKind, ShippingDiscountBasis};
pub use modules::extra_costs::{ExtraCost, ExtraCostKind};
pub use modules::shipping::ShippingRate;
