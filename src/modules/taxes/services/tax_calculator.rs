use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{validate_vat_rate, PricingConfig, ZoneTaxConfig};
use crate::core::{round2, Result};
use crate::modules::cart::models::CartSnapshot;

use super::rate_resolver::TaxRateResolver;

/// Computes item, shipping and extra-cost tax for a cart snapshot.
///
/// Tax is summed unrounded and rounded once at each public method, never
/// per line. A VAT-exempt cart short-circuits every method to zero.
pub struct TaxCalculator;

impl TaxCalculator {
    /// Tax over the cart's line items
    ///
    /// Each item resolves its own rate through the rate resolver, so a
    /// single cart can mix category, type and per-item rates.
    pub fn items_tax(snapshot: &CartSnapshot, config: &PricingConfig) -> Decimal {
        if snapshot.vat_exempt {
            return Decimal::ZERO;
        }

        let zone = Self::zone_config(snapshot, config);
        let raw: Decimal = snapshot
            .items
            .iter()
            .map(|item| item.line_total() * TaxRateResolver::resolve(zone, item))
            .sum();

        round2(raw)
    }

    /// Tax over the resolved shipping amount
    ///
    /// Zero when the cart is VAT-exempt, no method is selected, or the
    /// shipping cost already embeds VAT (per the selection or the method
    /// configuration). The rate resolves like the shipping calculator's
    /// metadata does: an explicit selection rate wins, then the configured
    /// method rate, then the zone default when the zone is configured to
    /// tax shipping.
    pub fn shipping_tax(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
        shipping_amount: Decimal,
    ) -> Result<Decimal> {
        if snapshot.vat_exempt {
            return Ok(Decimal::ZERO);
        }

        let Some(selection) = &snapshot.shipping else {
            return Ok(Decimal::ZERO);
        };

        let method = config.shipping_method_config(&selection.method_id);

        if selection.vat_included || method.map(|m| m.vat_included).unwrap_or(false) {
            return Ok(Decimal::ZERO);
        }

        let rate = match selection.vat_rate {
            Some(rate) => {
                validate_vat_rate(rate, "shipping selection")?;
                rate
            }
            None => match method.and_then(|m| m.vat_rate) {
                Some(rate) => {
                    validate_vat_rate(rate, &format!("shipping method {}", selection.method_id))?;
                    rate
                }
                None => Self::zone_config(snapshot, config)
                    .filter(|zone| zone.apply_to_shipping)
                    .map(|zone| zone.default_rate)
                    .unwrap_or(Decimal::ZERO),
            },
        };

        Ok(round2(shipping_amount * rate))
    }

    /// Tax over the cart's extra costs
    ///
    /// Each cost carries its own VAT treatment: `vat_included` costs
    /// contribute nothing, an explicit `vat_rate` wins, and costs without
    /// one fall back to the zone default rate.
    pub fn extra_costs_tax(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
        subtotal: Decimal,
    ) -> Result<Decimal> {
        if snapshot.vat_exempt {
            return Ok(Decimal::ZERO);
        }

        let default_rate = Self::zone_config(snapshot, config)
            .map(|zone| zone.default_rate)
            .unwrap_or(Decimal::ZERO);

        let mut raw = Decimal::ZERO;
        for cost in &snapshot.extra_costs {
            if cost.vat_included {
                continue;
            }

            let rate = match cost.vat_rate {
                Some(rate) => {
                    validate_vat_rate(rate, &format!("extra cost {}", cost.name))?;
                    rate
                }
                None => default_rate,
            };

            raw += cost.resolved_amount(subtotal) * rate;
        }

        Ok(round2(raw))
    }

    /// Total tax: items + shipping + extra costs, rounded once at the top
    pub fn total_tax(
        snapshot: &CartSnapshot,
        config: &PricingConfig,
        subtotal: Decimal,
        shipping_amount: Decimal,
    ) -> Result<Decimal> {
        let items = Self::items_tax(snapshot, config);
        let shipping = Self::shipping_tax(snapshot, config, shipping_amount)?;
        let extra_costs = Self::extra_costs_tax(snapshot, config, subtotal)?;

        debug!(
            %items,
            %shipping,
            %extra_costs,
            "tax breakdown computed"
        );

        Ok(round2(items + shipping + extra_costs))
    }

    fn zone_config<'a>(
        snapshot: &CartSnapshot,
        config: &'a PricingConfig,
    ) -> Option<&'a ZoneTaxConfig> {
        snapshot
            .tax_zone
            .as_deref()
            .and_then(|zone| config.zone_tax_config(zone))
    }
}
