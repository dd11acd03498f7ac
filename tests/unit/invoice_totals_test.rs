// Property-based tests for the invoice totals aggregator
//
// Properties tested:
// 1. sub_total equals the sum of the line totals exactly
// 2. grand_total equals sub_total plus the bucket amounts
// 3. one bucket per distinct rate, in first-occurrence order
// 4. reordering items keeps the totals
// 5. grand_total stays within one minor unit per item of the per-item gross sum
// 6. each bucket is taxed at the rate of its first item, even next to 0 and 1

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::TestDataFactory;
use invoice_report::invoices::{InvoiceTotals, LineItem};
use invoice_report::taxes::TaxCalculator;
use invoice_report::{AppError, Currency};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const RATES: [Decimal; 4] = [dec!(0), dec!(0.055), dec!(0.10), dec!(0.20)];

/// Common rates, plus rates with up to 15 decimals within 1e-6 of 0 and of 1
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        3 => prop::sample::select(RATES.to_vec()),
        1 => (1i64..1_000_000_000).prop_map(|n| Decimal::new(n, 15)),
        1 => (1i64..1_000_000_000).prop_map(|n| Decimal::ONE - Decimal::new(n, 15)),
    ]
}

fn arb_line_item() -> impl Strategy<Value = LineItem> {
    (0u32..500, 0i64..1_000_000, arb_rate()).prop_map(|(quantity, cents, rate)| {
        TestDataFactory::line_item(
            "Generated",
            Decimal::from(quantity),
            Decimal::new(cents, 2),
            rate,
        )
    })
}

fn arb_line_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_line_item(), 0..20)
}

proptest! {
    #[test]
    fn test_sub_total_is_sum_of_line_totals(items in arb_line_items()) {
        let currency = Currency::eur();
        let totals = InvoiceTotals::compute(&items, &currency).unwrap();
        let expected: Decimal = items.iter().map(|i| i.total_price(&currency).unwrap()).sum();

        prop_assert_eq!(totals.sub_total, expected);
    }

    #[test]
    fn test_grand_total_adds_bucket_amounts(items in arb_line_items()) {
        let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();

        prop_assert_eq!(totals.grand_total, totals.sub_total + totals.tax_total());
    }

    #[test]
    fn test_bucket_bases_cover_sub_total(items in arb_line_items()) {
        let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();
        let bases: Decimal = totals.tax_buckets.iter().map(|b| b.base).sum();

        prop_assert_eq!(bases, totals.sub_total);
    }

    #[test]
    fn test_one_bucket_per_distinct_rate(items in arb_line_items()) {
        let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();

        let mut keys: Vec<Decimal> = Vec::new();
        let mut first_seen: Vec<Decimal> = Vec::new();
        for item in &items {
            let key = item.tax.normalized_rate();
            if !keys.contains(&key) {
                keys.push(key);
                first_seen.push(item.tax.rate);
            }
        }
        let bucket_rates: Vec<Decimal> = totals.tax_buckets.iter().map(|b| b.rate).collect();

        prop_assert_eq!(bucket_rates, first_seen);
    }

    #[test]
    fn test_bucket_amount_uses_first_rate(items in arb_line_items()) {
        let currency = Currency::eur();
        let totals = InvoiceTotals::compute(&items, &currency).unwrap();
        let calculator = TaxCalculator::new();

        for bucket in &totals.tax_buckets {
            prop_assert!(bucket.rate < Decimal::ONE);
            prop_assert_eq!(
                bucket.amount,
                calculator.calculate_tax(bucket.base, bucket.rate, &currency).unwrap()
            );
        }
    }

    #[test]
    fn test_reordering_keeps_totals(items in arb_line_items()) {
        let currency = Currency::eur();
        let forward = InvoiceTotals::compute(&items, &currency).unwrap();

        let mut reversed = items.clone();
        reversed.reverse();
        let backward = InvoiceTotals::compute(&reversed, &currency).unwrap();

        prop_assert_eq!(forward.sub_total, backward.sub_total);
        prop_assert_eq!(forward.grand_total, backward.grand_total);
        prop_assert_eq!(forward.tax_buckets.len(), backward.tax_buckets.len());
    }

    #[test]
    fn test_grand_total_close_to_per_item_gross(items in arb_line_items()) {
        let currency = Currency::eur();
        let totals = InvoiceTotals::compute(&items, &currency).unwrap();
        let per_item: Decimal = items.iter().map(|i| i.gross_total(&currency).unwrap()).sum();
        let tolerance = currency.smallest_unit() * Decimal::from(items.len().max(1));

        prop_assert!(
            (totals.grand_total - per_item).abs() <= tolerance,
            "grand total {} vs per-item gross {}", totals.grand_total, per_item
        );
    }
}

#[test]
fn test_reference_example() {
    let totals = InvoiceTotals::compute(&TestDataFactory::reference_items(), &Currency::eur()).unwrap();

    assert_eq!(totals.sub_total, dec!(125.00));
    assert_eq!(totals.tax_buckets.len(), 2);
    assert_eq!(totals.tax_buckets[0].rate, dec!(0.2));
    assert_eq!(totals.tax_buckets[0].base, dec!(25.00));
    assert_eq!(totals.tax_buckets[0].amount, dec!(5.00));
    assert_eq!(totals.tax_buckets[1].rate, dec!(0));
    assert_eq!(totals.tax_buckets[1].base, dec!(100.00));
    assert_eq!(totals.tax_buckets[1].amount, dec!(0.00));
    assert_eq!(totals.grand_total, dec!(130.00));
}

#[test]
fn test_empty_input_yields_zero_totals() {
    let totals = InvoiceTotals::compute(&[], &Currency::eur()).unwrap();

    assert!(totals.is_empty());
    assert_eq!(totals.sub_total, Decimal::ZERO);
    assert_eq!(totals.grand_total, Decimal::ZERO);
}

#[test]
fn test_negative_quantity_aborts() {
    let mut items = TestDataFactory::reference_items();
    items[1].quantity = dec!(-1);

    let result = InvoiceTotals::compute(&items, &Currency::eur());
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_rate_out_of_range_aborts() {
    let items = vec![TestDataFactory::line_item("Bad", dec!(1), dec!(10), dec!(1.5))];

    let result = InvoiceTotals::compute(&items, &Currency::eur());
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_noise_only_rate_difference_merges() {
    let items = vec![
        TestDataFactory::line_item("A", dec!(1), dec!(10.00), dec!(0.2)),
        TestDataFactory::line_item("B", dec!(1), dec!(10.00), dec!(0.20000000000000001)),
    ];

    let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();
    assert_eq!(totals.tax_buckets.len(), 1);
    assert_eq!(totals.tax_buckets[0].base, dec!(20.00));
    assert_eq!(totals.tax_buckets[0].amount, dec!(4.00));
}

#[test]
fn test_rate_next_to_one_is_accepted() {
    let items = vec![TestDataFactory::line_item("A", dec!(1), dec!(100.00), dec!(0.9999999))];

    let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();
    assert_eq!(totals.tax_buckets[0].amount, dec!(100.00));
    assert_eq!(totals.grand_total, dec!(200.00));
}

#[test]
fn test_tiny_rate_is_not_merged_into_zero() {
    let items = vec![
        TestDataFactory::line_item("A", dec!(1), dec!(1000000.00), dec!(0.0000004)),
        TestDataFactory::line_item("B", dec!(1), dec!(10), dec!(0)),
    ];

    let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();
    assert_eq!(totals.tax_buckets.len(), 2);
    assert_eq!(totals.tax_buckets[0].amount, dec!(0.40));
    assert_eq!(totals.tax_buckets[1].amount, dec!(0.00));
}

#[test]
fn test_overflowing_items_abort() {
    let items = vec![TestDataFactory::line_item(
        "Huge",
        dec!(100000000000000000000),
        dec!(10000000000000),
        dec!(0.2),
    )];

    let result = InvoiceTotals::compute(&items, &Currency::eur());
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_reordering_reorders_buckets() {
    let mut items = TestDataFactory::reference_items();
    items.reverse();

    let totals = InvoiceTotals::compute(&items, &Currency::eur()).unwrap();
    assert_eq!(totals.tax_buckets[0].rate, dec!(0));
    assert_eq!(totals.tax_buckets[1].rate, dec!(0.2));
    assert_eq!(totals.sub_total, dec!(125.00));
    assert_eq!(totals.grand_total, dec!(130.00));
}

#[test]
fn test_zero_scale_currency() {
    let idr: Currency = "IDR".parse().unwrap();
    let items = vec![TestDataFactory::line_item("Kopi", dec!(3), dec!(18500), dec!(0.11))];

    let totals = InvoiceTotals::compute(&items, &idr).unwrap();
    // 55500 × 0.11 = 6105
    assert_eq!(totals.sub_total, dec!(55500));
    assert_eq!(totals.tax_buckets[0].amount, dec!(6105));
    assert_eq!(totals.grand_total, dec!(61605));
}
