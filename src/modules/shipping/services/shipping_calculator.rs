use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{validate_vat_rate, PricingConfig};
use crate::core::{round2, Result};
use crate::modules::cart::models::CartSnapshot;
use crate::modules::shipping::models::ShippingRate;

/// Resolves the shipping cost for the selected method.
///
/// Cost is waived (zero) when a free-shipping discount is present in the
/// cart or the subtotal reaches the configured threshold. A free-shipping
/// discount applies regardless of its conditions.
pub struct ShippingCalculator;

impl ShippingCalculator {
    /// Resolved shipping amount for the cart
    ///
    /// # Arguments
    /// * `subtotal` - Cart items subtotal, used for the threshold check
    pub fn amount(snapshot: &CartSnapshot, config: &PricingConfig, subtotal: Decimal) -> Decimal {
        let Some(selection) = &snapshot.shipping else {
            return Decimal::ZERO;
        };

        if snapshot.has_free_shipping_discount() {
            debug!(method = %selection.method_id, "free shipping via discount");
            return Decimal::ZERO;
        }

        if let Some(threshold) = config.free_shipping_threshold() {
            // Inclusive boundary: subtotal equal to the threshold ships free
            if subtotal >= threshold {
                debug!(method = %selection.method_id, %threshold, "free shipping via threshold");
                return Decimal::ZERO;
            }
        }

        match config.shipping_method_config(&selection.method_id) {
            Some(method) => round2(method.cost),
            None => Decimal::ZERO,
        }
    }

    /// Whether free shipping is in effect
    ///
    /// True iff a method is selected and the resolved amount is exactly
    /// zero. Covers discount-driven and threshold-driven free shipping as
    /// well as methods configured with zero cost.
    pub fn is_free_shipping_applied(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
        subtotal: Decimal,
    ) -> bool {
        snapshot.shipping.is_some() && Self::amount(snapshot, config, subtotal).is_zero()
    }

    /// VAT metadata for the selected method
    ///
    /// Returns `None` when no method is selected. The selection's explicit
    /// rate and included flag win over the configured method values. Fails
    /// with a validation error when the resolved rate lies outside [0, 1].
    /// A VAT-exempt cart forces rate 0 and not-included.
    pub fn shipping_info(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
        subtotal: Decimal,
    ) -> Result<Option<ShippingRate>> {
        let Some(selection) = &snapshot.shipping else {
            return Ok(None);
        };

        let amount = Self::amount(snapshot, config, subtotal);

        if snapshot.vat_exempt {
            return Ok(Some(ShippingRate {
                amount,
                vat_rate: Some(Decimal::ZERO),
                vat_included: false,
            }));
        }

        let method = config.shipping_method_config(&selection.method_id);
        let vat_rate = selection
            .vat_rate
            .or_else(|| method.and_then(|m| m.vat_rate));
        let vat_included =
            selection.vat_included || method.map(|m| m.vat_included).unwrap_or(false);

        if let Some(rate) = vat_rate {
            validate_vat_rate(rate, &format!("shipping method {}", selection.method_id))?;
        }

        Ok(Some(ShippingRate {
            amount,
            vat_rate,
            vat_included,
        }))
    }
}
