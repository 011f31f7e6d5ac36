mod rate_resolver;
mod tax_calculator;

pub use rate_resolver::TaxRateResolver;
pub use tax_calculator::TaxCalculator;
