use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Resolved shipping rate with VAT metadata for the selected method.
///
/// `amount` is forced to zero when free-shipping conditions hold; VAT
/// metadata is forced to rate 0 / not-included when the cart is VAT-exempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub amount: Decimal,
    pub vat_rate: Option<Decimal>,
    pub vat_included: bool,
}
