mod line_item;
mod pricing_result;
mod snapshot;

pub use line_item::{LineItem, TYPE_METADATA_KEY};
pub use pricing_result::PricingResult;
pub use snapshot::{CartSnapshot, ShippingSelection};
