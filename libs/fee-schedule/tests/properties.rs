//! Property tests for the forward fee and its inverse (proptest)
//!
//! Invariants:
//! - The fee never exceeds the cap
//! - The fee is non-decreasing on each side of the threshold
//! - Charging `add_to(n)` settles exactly `n` when the cap does not clip
//! - With no flat charge, `add_to(n)` is the least such charge
//! - `add_to(net_of(g)) <= g` away from the threshold step
//! - A zero net amount grosses up to a charge of 1
//! - Cap-saturated nets settle exactly through the cap

use fee_schedule::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Large enough that no generated amount reaches it.
const UNCLIPPED_CAP: u64 = 1_000_000_000_000_000_000;

/// Rates in basis points over `[0, 1)`.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|bps| Decimal::new(bps, 4))
}

fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000).prop_map(|bps| Decimal::new(bps, 4))
}

fn amount() -> impl Strategy<Value = u64> {
    0u64..1_000_000_000
}

fn calculator(percentage: Decimal, additional_charge: u64, threshold: u64, cap: u64) -> FeeCalculator {
    FeeCalculator::from_schedule(FeeSchedule {
        percentage,
        additional_charge,
        threshold,
        cap,
    })
    .unwrap()
}

proptest! {
    #[test]
    fn prop_fee_never_exceeds_cap(
        percentage in rate(),
        additional_charge in 0u64..100_000,
        threshold in 0u64..10_000_000,
        cap in 1u64..1_000_000,
        gross in amount(),
    ) {
        let calc = calculator(percentage, additional_charge, threshold, cap);
        prop_assert!(calc.calculate_for(gross).unwrap() <= cap);
    }

    #[test]
    fn prop_fee_monotonic_on_each_side_of_threshold(
        percentage in rate(),
        additional_charge in 0u64..100_000,
        threshold in 0u64..10_000_000,
        cap in 1u64..1_000_000,
        a in amount(),
        b in amount(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!((low > threshold) == (high > threshold));

        let calc = calculator(percentage, additional_charge, threshold, cap);
        prop_assert!(calc.calculate_for(low).unwrap() <= calc.calculate_for(high).unwrap());
    }

    #[test]
    fn prop_add_to_settles_exactly(
        percentage in positive_rate(),
        additional_charge in 0u64..100_000,
        threshold in 0u64..10_000_000,
        net in amount(),
    ) {
        let calc = calculator(percentage, additional_charge, threshold, UNCLIPPED_CAP);
        let gross = calc.add_to(net).unwrap();
        prop_assert_eq!(calc.net_of(gross).unwrap(), net);
    }

    #[test]
    fn prop_add_to_is_least_gross_without_flat_charge(
        percentage in positive_rate(),
        threshold in 0u64..10_000_000,
        net in amount(),
    ) {
        let calc = calculator(percentage, 0, threshold, UNCLIPPED_CAP);
        let gross = calc.add_to(net).unwrap();
        if gross > 1 {
            prop_assert!(calc.net_of(gross - 1).unwrap() < net);
        }
    }

    #[test]
    fn prop_round_trip_never_overcharges(
        percentage in positive_rate(),
        additional_charge in 0u64..100_000,
        threshold in 0u64..10_000_000,
        gross in 1u64..1_000_000_000,
    ) {
        prop_assume!(additional_charge == 0 || gross > threshold);

        let calc = calculator(percentage, additional_charge, threshold, UNCLIPPED_CAP);
        prop_assume!(calc.calculate_for(gross).unwrap() <= gross);

        let net = calc.net_of(gross).unwrap();
        prop_assert!(calc.add_to(net).unwrap() <= gross);
    }

    #[test]
    fn prop_zero_net_grosses_up_to_one(
        percentage in positive_rate(),
        additional_charge in 0u64..100_000,
        threshold in 0u64..10_000_000,
    ) {
        let calc = calculator(percentage, additional_charge, threshold, UNCLIPPED_CAP);
        prop_assume!(calc.regime_for(0).unwrap() == InverseRegime::BelowThreshold);

        prop_assert_eq!(calc.add_to(0).unwrap(), 1);
        prop_assert_eq!(calc.net_of(1).unwrap(), 0);
    }

    #[test]
    fn prop_cap_saturated_net_settles_through_cap(
        percentage in positive_rate(),
        additional_charge in 0u64..1_000,
        cap in 1_000u64..100_000,
        net in amount(),
    ) {
        let calc = calculator(percentage, additional_charge, 0, cap);
        prop_assume!(calc.regime_for(net).unwrap() == InverseRegime::CapSaturated);

        let gross = calc.add_to(net).unwrap();
        prop_assert_eq!(gross, net + cap);
        prop_assert_eq!(calc.calculate_for(gross).unwrap(), cap);
        prop_assert_eq!(calc.net_of(gross).unwrap(), net);
    }

    #[test]
    fn prop_zero_rate_adds_capped_flat_charge(
        additional_charge in 0u64..100_000,
        threshold in 0u64..10_000_000,
        cap in 1u64..1_000_000,
        net in amount(),
    ) {
        let calc = calculator(Decimal::ZERO, additional_charge, threshold, cap);
        prop_assert_eq!(calc.regime_for(net).unwrap(), InverseRegime::FlatOnly);
        prop_assert_eq!(calc.add_to(net).unwrap(), net + additional_charge.min(cap));
    }
}
