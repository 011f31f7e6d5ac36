mod shipping_calculator;

pub use shipping_calculator::ShippingCalculator;
