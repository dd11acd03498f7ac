use invoice_report::taxes::models::normalize_rate;
use invoice_report::taxes::{Tax, TaxCalculator};
use invoice_report::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Property-based tests for bucket tax calculation
///
/// Validates:
/// - tax = round(base × rate) to the currency minor unit
/// - the result is deterministic, non-negative and never above the base
/// - rates outside [0, 1) are rejected

fn base_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        // 0% to 99.99% in basis points
        (0u32..10_000u32).prop_map(|bp| Decimal::from(bp) / Decimal::from(10_000)),
        fine_rate_strategy(),
    ]
}

/// Rates with up to 15 decimals within 1e-6 of 0 or of 1
fn fine_rate_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (1i64..1_000_000_000).prop_map(|n| Decimal::new(n, 15)),
        (1i64..1_000_000_000).prop_map(|n| Decimal::ONE - Decimal::new(n, 15)),
    ]
}

proptest! {
    #[test]
    fn test_tax_is_deterministic(base in base_strategy(), rate in rate_strategy()) {
        let calculator = TaxCalculator::new();
        let eur = Currency::eur();

        let first = calculator.calculate_tax(base, rate, &eur).unwrap();
        let second = calculator.calculate_tax(base, rate, &eur).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_tax_bounds(base in base_strategy(), rate in rate_strategy()) {
        let tax = TaxCalculator::new().calculate_tax(base, rate, &Currency::eur()).unwrap();

        prop_assert!(tax >= Decimal::ZERO, "Tax cannot be negative: {}", tax);
        prop_assert!(tax <= base, "Tax {} cannot exceed base {}", tax, base);
    }

    #[test]
    fn test_tax_is_within_half_unit_of_exact(base in base_strategy(), rate in rate_strategy()) {
        let eur = Currency::eur();
        let tax = TaxCalculator::new().calculate_tax(base, rate, &eur).unwrap();

        prop_assert!(tax.scale() <= eur.scale());
        prop_assert!((tax - base * rate).abs() <= dec!(0.005));
    }

    #[test]
    fn test_zero_rate_yields_zero(base in base_strategy()) {
        let tax = TaxCalculator::new().calculate_tax(base, Decimal::ZERO, &Currency::eur()).unwrap();
        prop_assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn test_rate_at_or_above_one_rejected(extra in 0u32..10_000u32) {
        let rate = Decimal::ONE + Decimal::from(extra) / Decimal::from(100);
        let result = TaxCalculator::new().calculate_tax(dec!(100), rate, &Currency::eur());

        prop_assert!(result.is_err());
        prop_assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_negative_rate_rejected(bp in 1u32..10_000u32) {
        let rate = -Decimal::from(bp) / Decimal::from(10_000);
        prop_assert!(TaxCalculator::new().validate_tax_rate(rate).is_err());
    }

    #[test]
    fn test_normalization_drops_trailing_zeros(bp in 0u32..10_000u32) {
        let rate = Decimal::from(bp) / Decimal::from(10_000);
        let padded = rate.round_dp(10);

        prop_assert_eq!(normalize_rate(rate).to_string(), normalize_rate(padded).to_string());
    }

    #[test]
    fn test_normalization_keeps_genuine_digits(rate in fine_rate_strategy()) {
        prop_assert_eq!(normalize_rate(rate), rate);
        prop_assert!(TaxCalculator::new().validate_tax_rate(normalize_rate(rate)).is_ok());
    }
}

#[test]
fn test_rounding_half_away_from_zero() {
    let calculator = TaxCalculator::new();
    let eur = Currency::eur();

    // 0.125 -> 0.13
    assert_eq!(calculator.calculate_tax(dec!(1.25), dec!(0.1), &eur).unwrap(), dec!(0.13));
    // 59.97 × 0.0825 = 4.947525 -> 4.95
    assert_eq!(calculator.calculate_tax(dec!(59.97), dec!(0.0825), &eur).unwrap(), dec!(4.95));
}

#[test]
fn test_zero_scale_currency_rounds_to_units() {
    let jpy: Currency = "JPY".parse().unwrap();
    // 1250 × 0.1 = 125; 1255 × 0.1 = 125.5 -> 126
    let calculator = TaxCalculator::new();
    assert_eq!(calculator.calculate_tax(dec!(1250), dec!(0.1), &jpy).unwrap(), dec!(125));
    assert_eq!(calculator.calculate_tax(dec!(1255), dec!(0.1), &jpy).unwrap(), dec!(126));
}

#[test]
fn test_rate_boundaries() {
    let calculator = TaxCalculator::new();
    assert!(calculator.validate_tax_rate(Decimal::ZERO).is_ok());
    assert!(calculator.validate_tax_rate(dec!(0.999999)).is_ok());
    assert!(calculator.validate_tax_rate(Decimal::ONE).is_err());
}

#[test]
fn test_tax_label() {
    assert_eq!(Tax::new("VAT", dec!(0.2)).label(), "VAT (20.00%)");
}
