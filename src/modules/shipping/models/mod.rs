mod shipping_rate;

pub use shipping_rate::ShippingRate;
