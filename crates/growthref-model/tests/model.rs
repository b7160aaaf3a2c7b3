use growthref_model::{
    Indicator, LmsEntry, Measurement, ReferenceKey, Sex, UndefinedReason, ZScore,
};

#[test]
fn measurement_serializes_with_indicator_code() {
    let measurement = Measurement::bmi_for_age(18.5, 100.5, 1);
    insta::assert_json_snapshot!(measurement, @r###"
    {
      "value": 18.5,
      "age_months": 100.5,
      "sex": 1,
      "indicator": "bmi_for_age"
    }
    "###);
}

#[test]
fn zscore_serializes_as_number_or_null() {
    let defined = serde_json::to_string(&ZScore::Value(-5.04)).expect("serialize value");
    assert_eq!(defined, "-5.04");

    let undefined = serde_json::to_string(&ZScore::Undefined(UndefinedReason::MissingInput))
        .expect("serialize undefined");
    assert_eq!(undefined, "null");
}

#[test]
fn undefined_reason_codes_are_stable() {
    let codes: Vec<&str> = UndefinedReason::ALL.iter().map(|r| r.code()).collect();
    assert_eq!(
        codes,
        vec![
            "missing_input",
            "invalid_measurement",
            "out_of_range",
            "invalid_sex",
            "reference_miss",
            "non_finite_result",
        ]
    );
    for reason in UndefinedReason::ALL {
        let json = serde_json::to_string(&reason).expect("serialize reason");
        assert_eq!(json, format!("\"{}\"", reason.code()));
    }
}

#[test]
fn reference_keys_order_by_sex_then_age() {
    let mut keys = vec![
        ReferenceKey::new(Sex::Female, 61),
        ReferenceKey::new(Sex::Male, 228),
        ReferenceKey::new(Sex::Male, 61),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            ReferenceKey::new(Sex::Male, 61),
            ReferenceKey::new(Sex::Male, 228),
            ReferenceKey::new(Sex::Female, 61),
        ]
    );
    assert!(keys.iter().all(ReferenceKey::in_window));
    assert!(!ReferenceKey::new(Sex::Male, 60).in_window());
}

#[test]
fn lms_entry_round_trips_through_json() {
    let entry = LmsEntry::new(-1.4, 16.25, 0.105);
    let json = serde_json::to_string(&entry).expect("serialize lms");
    let back: LmsEntry = serde_json::from_str(&json).expect("deserialize lms");
    assert_eq!(back, entry);
}

#[test]
fn indicator_metadata() {
    assert_eq!(Indicator::BmiForAge.column_name(), "zbmi");
    assert_eq!(Indicator::HeightForAge.column_name(), "zhfa");
    assert_eq!(Indicator::HeightForAge.unit(), "cm");
    assert_eq!(Indicator::ALL.len(), 2);
}
