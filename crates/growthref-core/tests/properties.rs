use growthref_core::{compute, lms_zscore, raw_zscore, round_half_away, sd_cutoff};
use growthref_model::{Indicator, LmsEntry, ZScore};
use proptest::prelude::*;

/// Cells shaped like the WHO tables: |L·S| <= 0.3 keeps every ±3 SD cutoff real.
fn lms_cell() -> impl Strategy<Value = LmsEntry> {
    (-2.0f64..2.0, 10.0f64..200.0, 0.03f64..0.15).prop_map(|(l, m, s)| LmsEntry::new(l, m, s))
}

fn indicator() -> impl Strategy<Value = Indicator> {
    prop_oneof![Just(Indicator::BmiForAge), Just(Indicator::HeightForAge)]
}

proptest! {
    #[test]
    fn median_scores_zero(lms in lms_cell(), indicator in indicator()) {
        prop_assert_eq!(compute(Some(lms.m), Ok(lms), indicator), ZScore::Value(0.0));
    }

    #[test]
    fn strictly_increasing_in_measurement(
        lms in lms_cell(),
        indicator in indicator(),
        ratio in 0.3f64..2.5,
        step in 1.001f64..1.5,
    ) {
        let lower = lms.m * ratio;
        let upper = lower * step;
        let z_lower = raw_zscore(lower, &lms, indicator);
        let z_upper = raw_zscore(upper, &lms, indicator);
        prop_assert!(z_upper > z_lower, "z({upper}) = {z_upper} <= z({lower}) = {z_lower}");

        let rounded_lower = compute(Some(lower), Ok(lms), indicator).value().unwrap();
        let rounded_upper = compute(Some(upper), Ok(lms), indicator).value().unwrap();
        prop_assert!(rounded_upper >= rounded_lower);
    }

    #[test]
    fn bmi_within_three_is_unmodified(lms in lms_cell(), target in -2.99f64..2.99) {
        let x = sd_cutoff(&lms, target);
        let plain = lms_zscore(x, &lms);
        prop_assert!(plain.abs() <= 3.0);
        prop_assert_eq!(
            compute(Some(x), Ok(lms), Indicator::BmiForAge),
            ZScore::Value(round_half_away(plain, 2))
        );
    }

    #[test]
    fn height_is_plain_lms_at_any_magnitude(lms in lms_cell(), ratio in 0.3f64..3.0) {
        let x = lms.m * ratio;
        prop_assert_eq!(
            compute(Some(x), Ok(lms), Indicator::HeightForAge),
            ZScore::Value(round_half_away(lms_zscore(x, &lms), 2))
        );
    }

    #[test]
    fn bmi_restriction_is_continuous_at_three(lms in lms_cell(), k in prop_oneof![Just(3.0), Just(-3.0)]) {
        let cutoff = sd_cutoff(&lms, k);
        for x in [cutoff * (1.0 - 1e-9), cutoff, cutoff * (1.0 + 1e-9)] {
            let z = raw_zscore(x, &lms, Indicator::BmiForAge);
            prop_assert!((z - k).abs() < 1e-6, "z({x}) = {z}, expected about {k}");
        }
    }

    #[test]
    fn bmi_beyond_three_stays_beyond_three(lms in lms_cell(), ratio in 1.0f64..1.5) {
        let x = sd_cutoff(&lms, 3.0) * ratio * 1.0001;
        let z = raw_zscore(x, &lms, Indicator::BmiForAge);
        prop_assert!(z > 3.0);
        let x = sd_cutoff(&lms, -3.0) / (ratio * 1.0001);
        let z = raw_zscore(x, &lms, Indicator::BmiForAge);
        prop_assert!(z < -3.0);
    }
}
