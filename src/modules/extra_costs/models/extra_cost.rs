// Extra costs are cart-level surcharges (gift wrap, handling, ...), either
// fixed or a percentage of the subtotal, each with independent VAT
// treatment.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How an extra cost amount is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraCostKind {
    /// Amount is a fixed charge
    Fixed,
    /// Amount is a percentage of the cart subtotal (5 = 5%)
    Percentage,
}

impl ExtraCostKind {
    pub fn from_raw(type_str: &str) -> Result<Self> {
        match type_str {
            "fixed" => Ok(ExtraCostKind::Fixed),
            "percentage" => Ok(ExtraCostKind::Percentage),
            other => Err(AppError::invalid_extra_cost(format!(
                "unknown extra cost type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExtraCostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraCostKind::Fixed => write!(f, "fixed"),
            ExtraCostKind::Percentage => write!(f, "percentage"),
        }
    }
}

/// A cart-level added cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCost {
    /// Name, unique within the cart (used for removal upstream)
    pub name: String,

    /// Fixed amount or percentage value depending on `kind`
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub kind: ExtraCostKind,

    /// Explicit VAT rate; `None` falls back to the zone default
    #[serde(default)]
    pub vat_rate: Option<Decimal>,

    /// When true, the amount already embeds VAT and no additional tax is
    /// computed for this cost regardless of `vat_rate`
    #[serde(default)]
    pub vat_included: bool,
}

impl ExtraCost {
    /// Create an extra cost with validation
    pub fn new(name: impl Into<String>, amount: Decimal, kind: ExtraCostKind) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(AppError::invalid_extra_cost("name cannot be empty"));
        }

        if kind == ExtraCostKind::Fixed && amount < Decimal::ZERO {
            return Err(AppError::invalid_extra_cost(format!(
                "fixed amount must be non-negative, got: {}",
                amount
            )));
        }

        Ok(Self {
            name,
            amount,
            kind,
            vat_rate: None,
            vat_included: false,
        })
    }

    /// Create from raw string input
    pub fn from_raw(name: impl Into<String>, amount: Decimal, type_str: &str) -> Result<Self> {
        let kind = ExtraCostKind::from_raw(type_str)?;
        Self::new(name, amount, kind)
    }

    /// Set an explicit VAT rate (builder style)
    pub fn with_vat_rate(mut self, vat_rate: Decimal) -> Self {
        self.vat_rate = Some(vat_rate);
        self
    }

    /// Mark the amount as VAT-inclusive (builder style)
    pub fn with_vat_included(mut self) -> Self {
        self.vat_included = true;
        self
    }

    /// Resolved amount of this cost against a cart subtotal
    pub fn resolved_amount(&self, subtotal: Decimal) -> Decimal {
        match self.kind {
            ExtraCostKind::Fixed => self.amount,
            ExtraCostKind::Percentage => subtotal * self.amount / Decimal::ONE_HUNDRED,
        }
    }
}
