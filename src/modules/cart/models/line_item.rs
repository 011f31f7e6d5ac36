// A line item represents a single product entry in the cart.
// Price and quantity bounds are enforced at construction; violations fail
// with a validation error, never a silent clamp.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Maximum accepted unit price
const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(99999999, 0, 0, false, 2); // 999999.99

/// Metadata key carrying the item type used by per-type tax overrides
pub const TYPE_METADATA_KEY: &str = "type";

/// A single product entry in the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifier, unique within the cart
    pub id: String,

    /// Display name
    pub name: String,

    /// Price per unit (0 ..= 999999.99)
    pub unit_price: Decimal,

    /// Quantity (>= 1)
    pub quantity: u32,

    /// Category used by category-scoped tax rates and discounts
    #[serde(default)]
    pub category: Option<String>,

    /// Free-form metadata; the "type" key feeds per-type tax overrides
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `id` - Identifier, unique within the cart
    /// * `name` - Display name
    /// * `unit_price` - Must be within [0, 999999.99]
    /// * `quantity` - Must be at least 1
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self> {
        let id = id.into();

        Self::validate_id(&id)?;
        Self::validate_unit_price(unit_price)?;
        Self::validate_quantity(quantity)?;

        Ok(Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
            category: None,
            metadata: BTreeMap::new(),
        })
    }

    /// Set the category (builder style)
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the item type metadata (builder style)
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.metadata
            .insert(TYPE_METADATA_KEY.to_string(), item_type.into());
        self
    }

    /// Line total: unit price × quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Item type read from metadata, if set
    pub fn item_type(&self) -> Option<&str> {
        self.metadata.get(TYPE_METADATA_KEY).map(String::as_str)
    }

    fn validate_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(AppError::invalid_line_item("id cannot be empty"));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::invalid_line_item(format!(
                "unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        if unit_price > MAX_UNIT_PRICE {
            return Err(AppError::invalid_line_item(format!(
                "unit price cannot exceed {}, got: {}",
                MAX_UNIT_PRICE, unit_price
            )));
        }

        Ok(())
    }

    fn validate_quantity(quantity: u32) -> Result<()> {
        if quantity < 1 {
            return Err(AppError::invalid_line_item(format!(
                "quantity must be at least 1, got: {}",
                quantity
            )));
        }

        Ok(())
    }
}
