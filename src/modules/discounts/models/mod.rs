mod discount;

pub use discount::{Discount, DiscountConditions, DiscountKind, ShippingDiscountBasis};
