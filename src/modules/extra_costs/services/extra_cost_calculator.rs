use rust_decimal::Decimal;

use crate::core::round2;
use crate::modules::cart::models::CartSnapshot;

/// Totals the cart's extra costs.
///
/// Fixed costs contribute their amount, percentage costs a share of the
/// subtotal. Tax treatment of each cost lives in the tax calculator.
pub struct ExtraCostCalculator;

impl ExtraCostCalculator {
    pub fn total(snapshot: &CartSnapshot, subtotal: Decimal) -> Decimal {
        let raw: Decimal = snapshot
            .extra_costs
            .iter()
            .map(|cost| cost.resolved_amount(subtotal))
            .sum();

        round2(raw)
    }
}
