// An immutable view of the cart, materialized upstream before each pricing
// call. Calculators only read it; mutation happens in the cart-management
// layer that produced it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::discounts::models::Discount;
use crate::modules::extra_costs::models::ExtraCost;

use super::line_item::LineItem;

/// The shipping method chosen for the cart, with optional VAT metadata
/// overriding the configured method rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingSelection {
    /// Configured shipping method id
    pub method_id: String,

    /// Explicit VAT rate for the shipping cost; `None` falls back to the
    /// zone default when the zone applies tax to shipping
    #[serde(default)]
    pub vat_rate: Option<Decimal>,

    /// Whether the displayed shipping cost already embeds VAT
    #[serde(default)]
    pub vat_included: bool,
}

impl ShippingSelection {
    pub fn new(method_id: impl Into<String>) -> Self {
        Self {
            method_id: method_id.into(),
            vat_rate: None,
            vat_included: false,
        }
    }
}

/// Read-only cart state passed to every calculator.
///
/// Discount order is insertion order and doubles as evaluation priority
/// when stacking is disallowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,

    /// Tax zone code; absent means zero tax
    #[serde(default)]
    pub tax_zone: Option<String>,

    /// When true, every tax computation short-circuits to zero
    #[serde(default)]
    pub vat_exempt: bool,

    #[serde(default)]
    pub shipping: Option<ShippingSelection>,

    #[serde(default)]
    pub discounts: Vec<Discount>,

    #[serde(default)]
    pub extra_costs: Vec<ExtraCost>,
}

impl CartSnapshot {
    /// Create a snapshot with uniqueness validation
    ///
    /// Item ids, discount codes and extra-cost names must each be unique
    /// within the cart.
    pub fn new(
        items: Vec<LineItem>,
        tax_zone: Option<String>,
        vat_exempt: bool,
        shipping: Option<ShippingSelection>,
        discounts: Vec<Discount>,
        extra_costs: Vec<ExtraCost>,
    ) -> Result<Self> {
        Self::validate_unique_items(&items)?;
        Self::validate_unique_discounts(&discounts)?;
        Self::validate_unique_extra_costs(&extra_costs)?;

        Ok(Self {
            items,
            tax_zone,
            vat_exempt,
            shipping,
            discounts,
            extra_costs,
        })
    }

    /// Empty cart with no zone, shipping, discounts or extra costs
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            tax_zone: None,
            vat_exempt: false,
            shipping: None,
            discounts: Vec::new(),
            extra_costs: Vec::new(),
        }
    }

    /// Sum of line totals, unrounded (callers round once at their level)
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of item quantities
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Whether any discount in the cart is of the free-shipping kind
    pub fn has_free_shipping_discount(&self) -> bool {
        self.discounts.iter().any(Discount::is_free_shipping)
    }

    fn validate_unique_items(items: &[LineItem]) -> Result<()> {
        for (idx, item) in items.iter().enumerate() {
            if items[..idx].iter().any(|other| other.id == item.id) {
                return Err(AppError::invalid_line_item(format!(
                    "duplicate item id: {}",
                    item.id
                )));
            }
        }

        Ok(())
    }

    fn validate_unique_discounts(discounts: &[Discount]) -> Result<()> {
        for (idx, discount) in discounts.iter().enumerate() {
            if discounts[..idx].iter().any(|other| other.code == discount.code) {
                return Err(AppError::invalid_discount(format!(
                    "duplicate discount code: {}",
                    discount.code
                )));
            }
        }

        Ok(())
    }

    fn validate_unique_extra_costs(extra_costs: &[ExtraCost]) -> Result<()> {
        for (idx, cost) in extra_costs.iter().enumerate() {
            if extra_costs[..idx].iter().any(|other| other.name == cost.name) {
                return Err(AppError::invalid_extra_cost(format!(
                    "duplicate extra cost name: {}",
                    cost.name
                )));
            }
        }

        Ok(())
    }
}
