// Cart pricing orchestrator. Stateless: every figure is a pure function of
// (snapshot, config), so concurrent pricing of different carts needs no
// coordination and repeated calls on an unchanged snapshot are idempotent.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::core::{round2, Result};
use crate::modules::cart::models::{CartSnapshot, PricingResult};
use crate::modules::discounts::services::DiscountCalculator;
use crate::modules::extra_costs::services::ExtraCostCalculator;
use crate::modules::shipping::services::ShippingCalculator;
use crate::modules::taxes::services::TaxCalculator;

/// Composes the tax, shipping, discount and extra-cost calculators into a
/// full pricing breakdown.
///
/// Evaluation order is fixed: subtotal first (discount eligibility and the
/// free-shipping threshold need it), then shipping (shipping tax and
/// shipping discounts need the amount), then tax, extra costs, discounts,
/// and finally the total, rounded once at the end.
///
/// Each accessor recomputes from the snapshot through the same calculators
/// `price` uses, so no accessor can diverge from the full breakdown.
pub struct CartPricingService;

impl CartPricingService {
    /// Full pricing breakdown for a snapshot
    pub fn price(snapshot: &CartSnapshot, config: &PricingConfig) -> Result<PricingResult> {
        let subtotal = Self::subtotal(snapshot);
        let shipping_amount = ShippingCalculator::amount(snapshot, config, subtotal);
        let tax_amount = TaxCalculator::total_tax(snapshot, config, subtotal, shipping_amount)?;
        let extra_costs_total = ExtraCostCalculator::total(snapshot, subtotal);
        let discount_amount =
            DiscountCalculator::calculate(snapshot, config, subtotal, shipping_amount);

        let total = round2(
            subtotal + shipping_amount + tax_amount + extra_costs_total - discount_amount,
        );

        debug!(
            %subtotal,
            %shipping_amount,
            %tax_amount,
            %extra_costs_total,
            %discount_amount,
            %total,
            "cart priced"
        );

        Ok(PricingResult {
            subtotal,
            shipping_amount,
            tax_amount,
            discount_amount,
            extra_costs_total,
            total,
            item_count: snapshot.item_count(),
            free_shipping_applied: ShippingCalculator::is_free_shipping_applied(
                snapshot, config, subtotal,
            ),
        })
    }

    /// Grand total
    pub fn total(snapshot: &CartSnapshot, config: &PricingConfig) -> Result<Decimal> {
        Ok(Self::price(snapshot, config)?.total)
    }

    /// Items subtotal, before tax, shipping and discounts
    pub fn subtotal(snapshot: &CartSnapshot) -> Decimal {
        round2(snapshot.items_total())
    }

    /// Resolved shipping amount
    pub fn shipping_amount(snapshot: &CartSnapshot, config: &PricingConfig) -> Decimal {
        ShippingCalculator::amount(snapshot, config, Self::subtotal(snapshot))
    }

    /// Total tax (items + shipping + extra costs)
    pub fn tax_amount(snapshot: &CartSnapshot, config: &PricingConfig) -> Result<Decimal> {
        let subtotal = Self::subtotal(snapshot);
        let shipping_amount = ShippingCalculator::amount(snapshot, config, subtotal);
        TaxCalculator::total_tax(snapshot, config, subtotal, shipping_amount)
    }

    /// Aggregate discount amount
    pub fn discount_amount(snapshot: &CartSnapshot, config: &PricingConfig) -> Decimal {
        let subtotal = Self::subtotal(snapshot);
        let shipping_amount = ShippingCalculator::amount(snapshot, config, subtotal);
        DiscountCalculator::calculate(snapshot, config, subtotal, shipping_amount)
    }

    /// Extra costs total, before their tax
    pub fn extra_costs_total(snapshot: &CartSnapshot) -> Decimal {
        ExtraCostCalculator::total(snapshot, Self::subtotal(snapshot))
    }

    /// Sum of item quantities
    pub fn item_count(snapshot: &CartSnapshot) -> u32 {
        snapshot.item_count()
    }

    /// Whether free shipping is in effect
    pub fn is_free_shipping_applied(snapshot: &CartSnapshot, config: &PricingConfig) -> bool {
        ShippingCalculator::is_free_shipping_applied(snapshot, config, Self::subtotal(snapshot))
    }
}
