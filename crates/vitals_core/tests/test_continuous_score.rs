//! Continuous scoring tests.
//!
//! Distance-based components: zero at the reference, growing linearly with
//! deviation, unclamped per factor; only the summed score clamps to 1.0.

use vitals_core::scoring::{
    ContinuousObservation, ContinuousRanges, ContinuousRangesError, evaluate_continuous,
};

fn reference_obs() -> ContinuousObservation {
    ContinuousObservation {
        age: 50.0,
        glucose: 100.0,
        bmi: 25.0,
        systolic: 120.0,
        diastolic: 80.0,
    }
}

#[test]
fn test_reference_parameterization_is_valid() {
    assert!(ContinuousRanges::reference().validate().is_ok());
}

#[test]
fn test_small_deviations_sum_unweighted() {
    // age 50, glucose 100, bmi 25, bp 120/80:
    //   age      |50 - 52.5| / 15   = 0.1667
    //   glucose  |100 - 100| / 30   = 0
    //   bmi      (25 - 24.9) / 15.1 = 0.0066
    //   bp       max(0, 0)          = 0
    let parts = evaluate_continuous(&ContinuousRanges::reference(), &reference_obs());
    assert!((parts.age_risk - 0.166667).abs() < 1e-4);
    assert_eq!(parts.glucose_risk, 0.0);
    assert!((parts.bmi_risk - 0.006623).abs() < 1e-4);
    assert_eq!(parts.bp_risk, 0.0);
    assert!((parts.total() - 0.173289).abs() < 1e-4);
}

#[test]
fn test_age_midpoint_scores_zero() {
    let obs = ContinuousObservation {
        age: 52.5,
        ..reference_obs()
    };
    let parts = evaluate_continuous(&ContinuousRanges::reference(), &obs);
    assert_eq!(parts.age_risk, 0.0);
}

#[test]
fn test_glucose_deviation_is_symmetric_around_band_top() {
    let ranges = ContinuousRanges::reference();
    let below = evaluate_continuous(
        &ranges,
        &ContinuousObservation {
            glucose: 70.0,
            ..reference_obs()
        },
    );
    let above = evaluate_continuous(
        &ranges,
        &ContinuousObservation {
            glucose: 130.0,
            ..reference_obs()
        },
    );
    assert!((below.glucose_risk - 1.0).abs() < 1e-12);
    assert!((above.glucose_risk - 1.0).abs() < 1e-12);
}

#[test]
fn test_bmi_zero_across_whole_band() {
    let ranges = ContinuousRanges::reference();
    for bmi in [18.5, 20.0, 22.7, 24.9] {
        let parts = evaluate_continuous(
            &ranges,
            &ContinuousObservation {
                bmi,
                ..reference_obs()
            },
        );
        assert_eq!(parts.bmi_risk, 0.0, "bmi {bmi} should contribute zero");
    }
}

#[test]
fn test_bmi_below_band_scales_by_lower_bound() {
    let parts = evaluate_continuous(
        &ContinuousRanges::reference(),
        &ContinuousObservation {
            bmi: 15.0,
            ..reference_obs()
        },
    );
    // (18.5 - 15) / 18.5
    assert!((parts.bmi_risk - 0.189189).abs() < 1e-4);
}

#[test]
fn test_bp_takes_worse_of_two_readings() {
    let ranges = ContinuousRanges::reference();
    let parts = evaluate_continuous(
        &ranges,
        &ContinuousObservation {
            systolic: 130.0,
            diastolic: 100.0,
            ..reference_obs()
        },
    );
    // systolic dev 10/40 = 0.25, diastolic dev 20/40 = 0.5; diastolic wins.
    assert!((parts.bp_risk - 0.5).abs() < 1e-12);
}

#[test]
fn test_total_clamps_to_one() {
    let parts = evaluate_continuous(
        &ContinuousRanges::reference(),
        &ContinuousObservation {
            age: 100.0,
            glucose: 200.0,
            bmi: 40.0,
            systolic: 200.0,
            diastolic: 130.0,
        },
    );
    // Every component well above its scale; the sum clamps, the parts do not.
    assert!(parts.age_risk > 1.0);
    assert!(parts.glucose_risk > 1.0);
    assert_eq!(parts.total(), 1.0);
}

#[test]
fn test_components_sum_when_under_clamp() {
    let parts = evaluate_continuous(&ContinuousRanges::reference(), &reference_obs());
    let sum = parts.age_risk + parts.glucose_risk + parts.bmi_risk + parts.bp_risk;
    assert_eq!(parts.total(), sum);
}

#[test]
fn test_degenerate_parameterizations_rejected() {
    let mut ranges = ContinuousRanges::reference();
    ranges.bmi_scale_max = 24.9;
    match ranges.validate() {
        Err(ContinuousRangesError::DegenerateScale {
            field: "bmi_scale_max",
        }) => {}
        other => panic!("expected DegenerateScale for bmi_scale_max, got {other:?}"),
    }

    let mut ranges = ContinuousRanges::reference();
    ranges.bp_scale = 0.0;
    match ranges.validate() {
        Err(ContinuousRangesError::DegenerateScale { field: "bp_scale" }) => {}
        other => panic!("expected DegenerateScale for bp_scale, got {other:?}"),
    }

    let mut ranges = ContinuousRanges::reference();
    ranges.age_normal.max = ranges.age_normal.min;
    match ranges.validate() {
        Err(ContinuousRangesError::MalformedInterval { field: "age_normal" }) => {}
        other => panic!("expected MalformedInterval for age_normal, got {other:?}"),
    }
}
