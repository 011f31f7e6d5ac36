use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Tax configuration for a single zone.
///
/// `rates_by_item`, `rates_by_category` and `rates_by_type` are override
/// tables consulted by the rate resolver before falling back to
/// `default_rate`. All rates are fractions in [0, 1] (0.19 = 19%).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneTaxConfig {
    /// Zone-wide default rate
    pub default_rate: Decimal,

    /// Whether the zone default also applies to shipping cost when the
    /// shipping selection carries no explicit rate
    #[serde(default)]
    pub apply_to_shipping: bool,

    /// Per-category rate overrides
    #[serde(default)]
    pub rates_by_category: HashMap<String, Decimal>,

    /// Per-product-id rate overrides (highest priority)
    #[serde(default)]
    pub rates_by_item: HashMap<String, Decimal>,

    /// Per-item-type rate overrides (item metadata key "type")
    #[serde(default)]
    pub rates_by_type: HashMap<String, Decimal>,
}

impl ZoneTaxConfig {
    pub fn new(default_rate: Decimal) -> Self {
        Self {
            default_rate,
            ..Default::default()
        }
    }
}

/// Rate configuration for a single shipping method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethodConfig {
    /// Base cost of the method
    pub cost: Decimal,

    /// VAT rate for the shipping cost; `None` means fall back to the zone
    /// default (if the zone applies tax to shipping)
    #[serde(default)]
    pub vat_rate: Option<Decimal>,

    /// Whether the configured cost already embeds VAT
    #[serde(default)]
    pub vat_included: bool,
}

/// Discount stacking policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Whether more than one discount code may apply to a single cart
    pub allow_stacking: bool,

    /// Maximum number of applied discount codes when stacking is allowed
    pub max_discount_codes: usize,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            allow_stacking: false,
            max_discount_codes: 1,
        }
    }
}

/// Immutable pricing configuration, threaded explicitly into every
/// calculator call.
///
/// The engine never reads ambient/global configuration; the host
/// application builds one of these per calculation (or reuses one, the
/// engine never mutates it).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Tax configuration keyed by zone code ("US", "RO", ...)
    #[serde(default)]
    pub zones: HashMap<String, ZoneTaxConfig>,

    /// Shipping rates keyed by method id ("standard", "express", ...)
    #[serde(default)]
    pub shipping_methods: HashMap<String, ShippingMethodConfig>,

    /// Subtotal at or above which shipping cost is waived (inclusive)
    #[serde(default)]
    pub free_shipping_threshold: Option<Decimal>,

    /// Discount stacking policy
    #[serde(default)]
    pub discount_policy: DiscountPolicy,
}

impl PricingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tax configuration for a zone, if the zone is known
    pub fn zone_tax_config(&self, zone: &str) -> Option<&ZoneTaxConfig> {
        self.zones.get(zone)
    }

    /// Rate configuration for a shipping method, if the method is known
    pub fn shipping_method_config(&self, method_id: &str) -> Option<&ShippingMethodConfig> {
        self.shipping_methods.get(method_id)
    }

    pub fn free_shipping_threshold(&self) -> Option<Decimal> {
        self.free_shipping_threshold
    }

    pub fn discount_policy(&self) -> &DiscountPolicy {
        &self.discount_policy
    }

    /// Validate configuration
    ///
    /// Rejects VAT rates outside [0, 1] and negative shipping costs. Hosts
    /// loading configuration from external storage should call this once
    /// before pricing with it.
    pub fn validate(&self) -> Result<()> {
        for (zone, tax) in &self.zones {
            validate_vat_rate(tax.default_rate, &format!("zone {} default rate", zone))?;
            for (category, rate) in &tax.rates_by_category {
                validate_vat_rate(*rate, &format!("zone {} category {}", zone, category))?;
            }
            for (item, rate) in &tax.rates_by_item {
                validate_vat_rate(*rate, &format!("zone {} item {}", zone, item))?;
            }
            for (item_type, rate) in &tax.rates_by_type {
                validate_vat_rate(*rate, &format!("zone {} type {}", zone, item_type))?;
            }
        }

        for (method, shipping) in &self.shipping_methods {
            if shipping.cost < Decimal::ZERO {
                return Err(AppError::configuration(format!(
                    "shipping method {} has negative cost {}",
                    method, shipping.cost
                )));
            }
            if let Some(rate) = shipping.vat_rate {
                validate_vat_rate(rate, &format!("shipping method {}", method))?;
            }
        }

        Ok(())
    }
}

/// Validate that a VAT rate lies within [0, 1].
///
/// Out-of-range rates are rejected, never silently clamped.
pub fn validate_vat_rate(rate: Decimal, context: &str) -> Result<()> {
    if rate < Decimal::ZERO {
        return Err(AppError::invalid_vat_rate(format!(
            "{}: rate {} is negative",
            context, rate
        )));
    }

    if rate > Decimal::ONE {
        return Err(AppError::invalid_vat_rate(format!(
            "{}: rate {} exceeds 1.0 (100%)",
            context, rate
        )));
    }

    Ok(())
}
