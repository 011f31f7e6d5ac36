// Discount evaluation: caps, condition scoping, stacking policy,
// first-valid-wins ordering and shipping-discount aggregation.

use cartpricer::config::{DiscountPolicy, PricingConfig};
use cartpricer::modules::cart::models::{CartSnapshot, LineItem};
use cartpricer::modules::discounts::models::{
    Discount, DiscountConditions, DiscountKind, ShippingDiscountBasis,
};
use cartpricer::modules::discounts::services::DiscountCalculator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn stacking_config(max: usize) -> PricingConfig {
    PricingConfig {
        discount_policy: DiscountPolicy {
            allow_stacking: true,
            max_discount_codes: max,
        },
        ..Default::default()
    }
}

fn no_stacking_config() -> PricingConfig {
    PricingConfig::default()
}

fn cart(items: Vec<LineItem>, discounts: Vec<Discount>) -> CartSnapshot {
    CartSnapshot::new(items, None, false, None, discounts, vec![]).unwrap()
}

fn fixed(code: &str, value: Decimal) -> Discount {
    Discount::new(code, DiscountKind::Fixed { value }).unwrap()
}

fn percentage(code: &str, value: Decimal) -> Discount {
    Discount::new(code, DiscountKind::Percentage { value }).unwrap()
}

#[test]
fn test_fixed_discount_capped_at_subtotal() {
    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(30.00), 1).unwrap()],
        vec![fixed("BIG", dec!(100.00))],
    );

    let amount =
        DiscountCalculator::calculate(&snapshot, &no_stacking_config(), dec!(30.00), Decimal::ZERO);
    assert_eq!(amount, dec!(30.00));
}

#[test]
fn test_percentage_discount_of_subtotal() {
    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(200.00), 1).unwrap()],
        vec![percentage("SAVE10", dec!(10))],
    );

    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(200.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(20.00));
}

#[test]
fn test_minimum_amount_condition_skips_and_does_not_block() {
    // First discount requires a higher subtotal; second should still apply.
    let gated = fixed("GATED", dec!(50.00)).with_conditions(DiscountConditions {
        minimum_amount: Some(dec!(500.00)),
        ..Default::default()
    });

    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![gated, fixed("OPEN", dec!(5.00))],
    );

    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(100.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(5.00));
}

#[test]
fn test_first_valid_wins_when_stacking_disallowed() {
    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![fixed("FIRST", dec!(5.00)), fixed("SECOND", dec!(50.00))],
    );

    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(100.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(5.00));
}

#[test]
fn test_stacking_respects_max_discount_codes() {
    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![
            fixed("ONE", dec!(5.00)),
            fixed("TWO", dec!(5.00)),
            fixed("THREE", dec!(5.00)),
        ],
    );

    let amount =
        DiscountCalculator::calculate(&snapshot, &stacking_config(2), dec!(100.00), Decimal::ZERO);
    assert_eq!(amount, dec!(10.00));
}

#[test]
fn test_percentage_bases_on_subtotal_less_fixed_when_stacked() {
    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![fixed("TEN-OFF", dec!(10.00)), percentage("TEN-PCT", dec!(10))],
    );

    // 10.00 fixed, then 10% of (100.00 - 10.00) = 9.00
    let amount =
        DiscountCalculator::calculate(&snapshot, &stacking_config(5), dec!(100.00), Decimal::ZERO);
    assert_eq!(amount, dec!(19.00));
}

#[test]
fn test_item_scoped_discount_targets_that_line_only() {
    let scoped = fixed("ITEM", dec!(100.00)).with_conditions(DiscountConditions {
        item_id: Some("cheap".into()),
        ..Default::default()
    });

    let snapshot = cart(
        vec![
            LineItem::new("cheap", "Cheap", dec!(10.00), 1).unwrap(),
            LineItem::new("dear", "Dear", dec!(200.00), 1).unwrap(),
        ],
        vec![scoped],
    );

    // capped at the targeted line total, not the cart subtotal
    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(210.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(10.00));
}

#[test]
fn test_category_scoped_percentage_uses_category_total() {
    let scoped = percentage("BOOKS", dec!(50)).with_conditions(DiscountConditions {
        category: Some("books".into()),
        ..Default::default()
    });

    let snapshot = cart(
        vec![
            LineItem::new("b1", "Novel", dec!(20.00), 2)
                .unwrap()
                .with_category("books"),
            LineItem::new("g", "Gadget", dec!(500.00), 1).unwrap(),
        ],
        vec![scoped],
    );

    // 50% of the books line total (40.00), not of the cart
    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(540.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(20.00));
}

#[test]
fn test_min_quantity_scoped_to_item() {
    let scoped = fixed("BULK", dec!(5.00)).with_conditions(DiscountConditions {
        item_id: Some("a".into()),
        min_quantity: Some(3),
        ..Default::default()
    });

    let under = cart(
        vec![LineItem::new("a", "A", dec!(10.00), 2).unwrap()],
        vec![scoped.clone()],
    );
    let over = cart(
        vec![LineItem::new("a", "A", dec!(10.00), 3).unwrap()],
        vec![scoped],
    );

    assert_eq!(
        DiscountCalculator::calculate(&under, &no_stacking_config(), dec!(20.00), Decimal::ZERO),
        Decimal::ZERO
    );
    assert_eq!(
        DiscountCalculator::calculate(&over, &no_stacking_config(), dec!(30.00), Decimal::ZERO),
        dec!(5.00)
    );
}

#[test]
fn test_min_quantity_scoped_to_category() {
    // Quantities sum across every line in the category; other lines in the
    // cart do not count.
    let scoped = fixed("BOOKWORM", dec!(5.00)).with_conditions(DiscountConditions {
        category: Some("books".into()),
        min_quantity: Some(3),
        ..Default::default()
    });

    let under = cart(
        vec![
            LineItem::new("b1", "Novel", dec!(10.00), 1)
                .unwrap()
                .with_category("books"),
            LineItem::new("b2", "Atlas", dec!(10.00), 1)
                .unwrap()
                .with_category("books"),
            LineItem::new("g", "Gadget", dec!(10.00), 5).unwrap(),
        ],
        vec![scoped.clone()],
    );
    let met = cart(
        vec![
            LineItem::new("b1", "Novel", dec!(10.00), 2)
                .unwrap()
                .with_category("books"),
            LineItem::new("b2", "Atlas", dec!(10.00), 1)
                .unwrap()
                .with_category("books"),
        ],
        vec![scoped],
    );

    assert_eq!(
        DiscountCalculator::calculate(&under, &no_stacking_config(), dec!(70.00), Decimal::ZERO),
        Decimal::ZERO
    );
    assert_eq!(
        DiscountCalculator::calculate(&met, &no_stacking_config(), dec!(30.00), Decimal::ZERO),
        dec!(5.00)
    );
}

#[test]
fn test_min_quantity_unscoped_counts_whole_cart() {
    let bulk = fixed("BULK", dec!(5.00)).with_conditions(DiscountConditions {
        min_quantity: Some(4),
        ..Default::default()
    });

    let under = cart(
        vec![
            LineItem::new("a", "A", dec!(10.00), 2).unwrap(),
            LineItem::new("b", "B", dec!(10.00), 1).unwrap(),
        ],
        vec![bulk.clone()],
    );
    let met = cart(
        vec![
            LineItem::new("a", "A", dec!(10.00), 2).unwrap(),
            LineItem::new("b", "B", dec!(10.00), 2).unwrap(),
        ],
        vec![bulk],
    );

    assert_eq!(
        DiscountCalculator::calculate(&under, &no_stacking_config(), dec!(30.00), Decimal::ZERO),
        Decimal::ZERO
    );
    assert_eq!(
        DiscountCalculator::calculate(&met, &no_stacking_config(), dec!(40.00), Decimal::ZERO),
        dec!(5.00)
    );
}

#[test]
fn test_shipping_discount_capped_at_shipping_amount() {
    let shipping = Discount::new(
        "SHIP10",
        DiscountKind::Shipping {
            value: dec!(10.00),
            basis: ShippingDiscountBasis::Amount,
        },
    )
    .unwrap();

    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![shipping],
    );

    let amount =
        DiscountCalculator::calculate(&snapshot, &no_stacking_config(), dec!(100.00), dec!(5.99));
    assert_eq!(amount, dec!(5.99));
}

#[test]
fn test_shipping_percentage_discount() {
    let shipping = Discount::new(
        "SHIP50PCT",
        DiscountKind::Shipping {
            value: dec!(50),
            basis: ShippingDiscountBasis::Percentage,
        },
    )
    .unwrap();

    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![shipping],
    );

    let amount =
        DiscountCalculator::calculate(&snapshot, &no_stacking_config(), dec!(100.00), dec!(6.00));
    assert_eq!(amount, dec!(3.00));
}

#[test]
fn test_aggregate_shipping_discounts_never_exceed_shipping() {
    let first = Discount::new(
        "SHIP-A",
        DiscountKind::Shipping {
            value: dec!(4.00),
            basis: ShippingDiscountBasis::Amount,
        },
    )
    .unwrap();
    let second = Discount::new(
        "SHIP-B",
        DiscountKind::Shipping {
            value: dec!(4.00),
            basis: ShippingDiscountBasis::Amount,
        },
    )
    .unwrap();

    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![first, second],
    );

    let amount =
        DiscountCalculator::calculate(&snapshot, &stacking_config(5), dec!(100.00), dec!(5.99));
    assert_eq!(amount, dec!(5.99));
}

#[test]
fn test_free_shipping_contributes_zero_and_consumes_no_slot() {
    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(100.00), 1).unwrap()],
        vec![
            Discount::new("FREESHIP", DiscountKind::FreeShipping).unwrap(),
            fixed("AFTER", dec!(5.00)),
        ],
    );

    // Even without stacking, the free-shipping entry does not use up the
    // single applicable slot.
    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(100.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(5.00));
}

#[test]
fn test_no_discounts_means_zero() {
    let snapshot = cart(vec![LineItem::new("a", "A", dec!(10.00), 1).unwrap()], vec![]);
    assert_eq!(
        DiscountCalculator::calculate(&snapshot, &no_stacking_config(), dec!(10.00), Decimal::ZERO),
        Decimal::ZERO
    );
}

#[test]
fn test_item_scope_matching_nothing_contributes_zero() {
    let scoped = fixed("GHOST", dec!(5.00)).with_conditions(DiscountConditions {
        item_id: Some("missing".into()),
        ..Default::default()
    });

    let snapshot = cart(
        vec![LineItem::new("a", "A", dec!(10.00), 1).unwrap()],
        vec![scoped, fixed("REAL", dec!(2.00))],
    );

    // the unmatched discount is skipped and the next candidate applies
    let amount = DiscountCalculator::calculate(
        &snapshot,
        &no_stacking_config(),
        dec!(10.00),
        Decimal::ZERO,
    );
    assert_eq!(amount, dec!(2.00));
}
