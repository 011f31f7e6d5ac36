pub mod cart;
pub mod discounts;
pub mod extra_costs;
pub mod shipping;
pub mod taxes;
