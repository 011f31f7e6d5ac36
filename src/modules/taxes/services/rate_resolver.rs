use rust_decimal::Decimal;

use crate::config::ZoneTaxConfig;
use crate::modules::cart::models::LineItem;

/// Resolves the effective tax rate for a single item.
///
/// Priority, highest first: per-product-id override, per-category override,
/// per-type override (item metadata "type"), zone default. No zone means
/// zero tax. Each item resolves independently; one cart can mix rates.
pub struct TaxRateResolver;

impl TaxRateResolver {
    pub fn resolve(zone: Option<&ZoneTaxConfig>, item: &LineItem) -> Decimal {
        let Some(zone) = zone else {
            return Decimal::ZERO;
        };

        if let Some(rate) = zone.rates_by_item.get(&item.id) {
            return *rate;
        }

        if let Some(category) = &item.category {
            if let Some(rate) = zone.rates_by_category.get(category) {
                return *rate;
            }
        }

        if let Some(item_type) = item.item_type() {
            if let Some(rate) = zone.rates_by_type.get(item_type) {
                return *rate;
            }
        }

        zone.default_rate
    }
}
