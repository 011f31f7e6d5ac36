use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::core::round2;
use crate::modules::cart::models::CartSnapshot;
use crate::modules::discounts::models::{
    Discount, DiscountConditions, DiscountKind, ShippingDiscountBasis,
};

/// Evaluates the cart's discounts against the stacking policy.
///
/// Discounts are visited in insertion order. A discount with unmet
/// conditions contributes nothing and never blocks the next candidate.
/// With stacking disallowed, evaluation stops after the first discount
/// that passes validation and yields a non-zero amount; with stacking
/// allowed, it stops once `max_discount_codes` discounts have applied.
///
/// Free-shipping discounts are transparent here: they contribute zero and
/// consume no stacking slot, since their entire effect is realized in the
/// shipping calculator. Counting them would double-book the benefit and
/// silently suppress a later monetary discount.
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Aggregate discount amount for the cart
    ///
    /// # Arguments
    /// * `subtotal` - Cart items subtotal (condition checks, caps)
    /// * `shipping_amount` - Resolved shipping cost (shipping discount caps)
    pub fn calculate(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
        subtotal: Decimal,
        shipping_amount: Decimal,
    ) -> Decimal {
        let policy = config.discount_policy();
        let max_applied = if policy.allow_stacking {
            policy.max_discount_codes
        } else {
            1
        };

        let mut non_shipping_total = Decimal::ZERO;
        let mut shipping_total = Decimal::ZERO;
        let mut fixed_applied = Decimal::ZERO;
        let mut applied = 0usize;

        for discount in &snapshot.discounts {
            if discount.is_free_shipping() {
                continue;
            }

            if applied >= max_applied {
                break;
            }

            if !Self::conditions_met(discount, snapshot, subtotal) {
                debug!(code = %discount.code, "discount conditions not met, skipping");
                continue;
            }

            let amount = match &discount.kind {
                DiscountKind::Fixed { value } => {
                    let target = Self::target_subtotal(discount, snapshot, subtotal);
                    (*value).min(target)
                }
                DiscountKind::Percentage { value } => {
                    let base = Self::percentage_base(discount, snapshot, subtotal, fixed_applied);
                    base * *value / Decimal::ONE_HUNDRED
                }
                DiscountKind::Shipping { value, basis } => match basis {
                    ShippingDiscountBasis::Amount => (*value).min(shipping_amount),
                    ShippingDiscountBasis::Percentage => {
                        shipping_amount * *value / Decimal::ONE_HUNDRED
                    }
                },
                // handled by the shipping calculator
                DiscountKind::FreeShipping => Decimal::ZERO,
            };

            if amount <= Decimal::ZERO {
                continue;
            }

            if discount.is_shipping() {
                shipping_total += amount;
            } else {
                non_shipping_total += amount;
                if matches!(discount.kind, DiscountKind::Fixed { .. }) {
                    fixed_applied += amount;
                }
            }

            applied += 1;
            debug!(code = %discount.code, kind = %discount.kind, %amount, "discount applied");
        }

        // The non-shipping portion can never exceed the subtotal, and the
        // aggregate shipping portion can never exceed the shipping cost.
        let non_shipping_capped = non_shipping_total.min(subtotal);
        let shipping_capped = shipping_total.min(shipping_amount.max(Decimal::ZERO));

        round2(non_shipping_capped + shipping_capped)
    }

    /// Validate a discount's conditions against the cart
    ///
    /// Minimum amount is checked against the cart subtotal. Minimum
    /// quantity is checked against the targeted item when `item_id` is
    /// set, otherwise against the targeted category, otherwise against the
    /// whole cart.
    fn conditions_met(discount: &Discount, snapshot: &CartSnapshot, subtotal: Decimal) -> bool {
        let Some(conditions) = &discount.conditions else {
            return true;
        };

        if let Some(minimum) = conditions.minimum_amount {
            if subtotal < minimum {
                return false;
            }
        }

        if let Some(min_quantity) = conditions.min_quantity {
            if Self::matching_quantity(conditions, snapshot) < min_quantity {
                return false;
            }
        }

        // An item-id scope that matches nothing can never apply
        if let Some(item_id) = &conditions.item_id {
            if !snapshot.items.iter().any(|item| &item.id == item_id) {
                return false;
            }
        }

        true
    }

    fn matching_quantity(conditions: &DiscountConditions, snapshot: &CartSnapshot) -> u32 {
        if let Some(item_id) = &conditions.item_id {
            return snapshot
                .items
                .iter()
                .filter(|item| &item.id == item_id)
                .map(|item| item.quantity)
                .sum();
        }

        if let Some(category) = &conditions.category {
            return snapshot
                .items
                .iter()
                .filter(|item| item.category.as_deref() == Some(category.as_str()))
                .map(|item| item.quantity)
                .sum();
        }

        snapshot.item_count()
    }

    /// Line total of the items the discount targets
    ///
    /// Item-id scope wins over category scope; an unscoped discount
    /// targets the whole cart.
    fn target_subtotal(discount: &Discount, snapshot: &CartSnapshot, subtotal: Decimal) -> Decimal {
        let Some(conditions) = &discount.conditions else {
            return subtotal;
        };

        if let Some(item_id) = &conditions.item_id {
            return snapshot
                .items
                .iter()
                .filter(|item| &item.id == item_id)
                .map(|item| item.line_total())
                .sum();
        }

        if let Some(category) = &conditions.category {
            return snapshot
                .items
                .iter()
                .filter(|item| item.category.as_deref() == Some(category.as_str()))
                .map(|item| item.line_total())
                .sum();
        }

        subtotal
    }

    /// Base for a percentage discount
    ///
    /// Cart-wide percentages apply after fixed discounts already stacked
    /// on the cart; item- and category-scoped percentages use their own
    /// target's line total, which cart-level fixed discounts do not shrink.
    fn percentage_base(
        discount: &Discount,
        snapshot: &CartSnapshot,
        subtotal: Decimal,
        fixed_applied: Decimal,
    ) -> Decimal {
        let scoped = discount
            .conditions
            .as_ref()
            .map(|c| c.item_id.is_some() || c.category.is_some())
            .unwrap_or(false);

        if scoped {
            Self::target_subtotal(discount, snapshot, subtotal)
        } else {
            (subtotal - fixed_applied).max(Decimal::ZERO)
        }
    }
}
