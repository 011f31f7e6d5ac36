mod discount_calculator;

pub use discount_calculator::DiscountCalculator;
