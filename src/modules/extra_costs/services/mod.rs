mod extra_cost_calculator;

pub use extra_cost_calculator::ExtraCostCalculator;
