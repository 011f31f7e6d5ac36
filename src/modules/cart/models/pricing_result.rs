use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full pricing breakdown for a cart snapshot.
///
/// All monetary figures are rounded to 2 decimals. The breakdown always
/// satisfies `total == round2(subtotal + shipping_amount + tax_amount +
/// extra_costs_total - discount_amount)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Sum of line totals, before tax, shipping and discounts
    pub subtotal: Decimal,

    /// Resolved shipping cost (zero when waived or no method selected)
    pub shipping_amount: Decimal,

    /// Items tax + shipping tax + extra-costs tax
    pub tax_amount: Decimal,

    /// Aggregate discount, capped so it never exceeds what it discounts
    pub discount_amount: Decimal,

    /// Fixed and percentage extra costs, before their tax
    pub extra_costs_total: Decimal,

    /// Grand total
    pub total: Decimal,

    /// Sum of item quantities
    pub item_count: u32,

    /// True when a method is selected and its resolved cost is zero
    pub free_shipping_applied: bool,
}
