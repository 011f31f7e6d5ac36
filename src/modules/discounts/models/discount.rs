// Discount model. The discount type is a tagged variant rather than string
// dispatch; raw string input from external systems goes through `from_raw`
// and is rejected at construction when malformed.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How a shipping-type discount interprets its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingDiscountBasis {
    /// Value is a fixed amount off the shipping cost
    Amount,
    /// Value is a percentage of the shipping cost
    Percentage,
}

impl Default for ShippingDiscountBasis {
    fn default() -> Self {
        ShippingDiscountBasis::Amount
    }
}

/// Discount behavior, tagged by type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Fixed amount off the targeted subtotal
    Fixed { value: Decimal },

    /// Percentage of the targeted subtotal (value 10 = 10%)
    Percentage { value: Decimal },

    /// Reduction of the shipping cost
    Shipping {
        value: Decimal,
        #[serde(default)]
        basis: ShippingDiscountBasis,
    },

    /// Zeroes the shipping cost; carries no amount of its own
    FreeShipping,
}

impl DiscountKind {
    /// Construct from raw string input
    ///
    /// # Arguments
    /// * `type_str` - One of "fixed", "percentage", "shipping", "free_shipping"
    /// * `value` - Discount value; ignored for "free_shipping"
    /// * `applies_to` - For "shipping": "percentage" switches the basis
    pub fn from_raw(type_str: &str, value: Decimal, applies_to: Option<&str>) -> Result<Self> {
        let kind = match type_str {
            "fixed" => DiscountKind::Fixed { value },
            "percentage" => DiscountKind::Percentage { value },
            "shipping" => DiscountKind::Shipping {
                value,
                basis: match applies_to {
                    Some("percentage") => ShippingDiscountBasis::Percentage,
                    _ => ShippingDiscountBasis::Amount,
                },
            },
            "free_shipping" => DiscountKind::FreeShipping,
            other => {
                return Err(AppError::invalid_discount(format!(
                    "unknown discount type: {}",
                    other
                )))
            }
        };

        Ok(kind)
    }

    fn value(&self) -> Option<Decimal> {
        match self {
            DiscountKind::Fixed { value }
            | DiscountKind::Percentage { value }
            | DiscountKind::Shipping { value, .. } => Some(*value),
            DiscountKind::FreeShipping => None,
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Fixed { .. } => write!(f, "fixed"),
            DiscountKind::Percentage { .. } => write!(f, "percentage"),
            DiscountKind::Shipping { .. } => write!(f, "shipping"),
            DiscountKind::FreeShipping => write!(f, "free_shipping"),
        }
    }
}

/// Eligibility conditions attached to a discount.
///
/// A discount with unmet conditions contributes nothing but does not block
/// evaluation of the next candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConditions {
    /// Minimum cart subtotal for the discount to apply
    #[serde(default)]
    pub minimum_amount: Option<Decimal>,

    /// Minimum quantity across the targeted items
    #[serde(default)]
    pub min_quantity: Option<u32>,

    /// Restrict the discount to items of this category
    #[serde(default)]
    pub category: Option<String>,

    /// Restrict the discount to a single item id (takes precedence over
    /// `category` when both are set)
    #[serde(default)]
    pub item_id: Option<String>,
}

impl DiscountConditions {
    pub fn is_empty(&self) -> bool {
        self.minimum_amount.is_none()
            && self.min_quantity.is_none()
            && self.category.is_none()
            && self.item_id.is_none()
    }
}

/// A discount code attached to the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Code, unique within the cart
    pub code: String,

    #[serde(flatten)]
    pub kind: DiscountKind,

    #[serde(default)]
    pub conditions: Option<DiscountConditions>,
}

impl Discount {
    /// Create a discount with validation
    pub fn new(code: impl Into<String>, kind: DiscountKind) -> Result<Self> {
        let code = code.into();

        if code.trim().is_empty() {
            return Err(AppError::invalid_discount("code cannot be empty"));
        }

        if let Some(value) = kind.value() {
            if value < Decimal::ZERO {
                return Err(AppError::invalid_discount(format!(
                    "value must be non-negative, got: {}",
                    value
                )));
            }
        }

        Ok(Self {
            code,
            kind,
            conditions: None,
        })
    }

    /// Create a discount from raw string input
    pub fn from_raw(
        code: impl Into<String>,
        type_str: &str,
        value: Decimal,
        applies_to: Option<&str>,
    ) -> Result<Self> {
        let kind = DiscountKind::from_raw(type_str, value, applies_to)?;
        Self::new(code, kind)
    }

    /// Attach eligibility conditions (builder style)
    pub fn with_conditions(mut self, conditions: DiscountConditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn is_free_shipping(&self) -> bool {
        matches!(self.kind, DiscountKind::FreeShipping)
    }

    pub fn is_shipping(&self) -> bool {
        matches!(self.kind, DiscountKind::Shipping { .. })
    }
}
