use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places using half-up rounding.
///
/// This is the canonical rounding for every figure the engine reports.
/// It is applied once, as the final step of each public calculator method,
/// never on intermediate per-item values: rounding per line and summing
/// afterwards drifts (ten items taxed at 19% of 9.99 must yield 18.98,
/// the rounded sum, not the sum of ten rounded per-item taxes).
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
