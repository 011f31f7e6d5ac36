use std::fmt;

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Pricing engine error type
///
/// Every variant is a synchronous input-validation failure raised at a
/// construction or calculator boundary. The engine never catches and
/// suppresses these; callers translate them into application-level
/// responses.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Line item rejected at construction (price or quantity out of bounds)
    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    /// Discount rejected at construction (unknown type, negative value)
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    /// VAT rate outside [0, 1]
    #[error("Invalid VAT rate: {0}")]
    InvalidVatRate(String),

    /// Extra cost rejected at construction (unknown type, negative fixed amount)
    #[error("Invalid extra cost: {0}")]
    InvalidExtraCost(String),

    /// Malformed pricing configuration (negative costs, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn invalid_line_item(msg: impl Into<String>) -> Self {
        AppError::InvalidLineItem(msg.into())
    }

    pub fn invalid_discount(msg: impl Into<String>) -> Self {
        AppError::InvalidDiscount(msg.into())
    }

    pub fn invalid_vat_rate(msg: impl Into<String>) -> Self {
        AppError::InvalidVatRate(msg.into())
    }

    pub fn invalid_extra_cost(msg: impl Into<String>) -> Self {
        AppError::InvalidExtraCost(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }
}

/// Stable machine-readable error kind, useful for callers mapping
/// validation failures onto their own response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidLineItem,
    InvalidDiscount,
    InvalidVatRate,
    InvalidExtraCost,
    Configuration,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidLineItem(_) => ErrorKind::InvalidLineItem,
            AppError::InvalidDiscount(_) => ErrorKind::InvalidDiscount,
            AppError::InvalidVatRate(_) => ErrorKind::InvalidVatRate,
            AppError::InvalidExtraCost(_) => ErrorKind::InvalidExtraCost,
            AppError::Configuration(_) => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidLineItem => write!(f, "invalid_line_item"),
            ErrorKind::InvalidDiscount => write!(f, "invalid_discount"),
            ErrorKind::InvalidVatRate => write!(f, "invalid_vat_rate"),
            ErrorKind::InvalidExtraCost => write!(f, "invalid_extra_cost"),
            ErrorKind::Configuration => write!(f, "configuration"),
        }
    }
}
