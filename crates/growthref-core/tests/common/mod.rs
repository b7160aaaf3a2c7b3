//! Synthetic reference cells with hand-checkable arithmetic.

use std::collections::BTreeMap;

use growthref_model::{Indicator, LmsEntry, ReferenceKey, Sex};

pub type Fixture = BTreeMap<(Indicator, ReferenceKey), LmsEntry>;

/// L = -1, M = 16, S = 0.1: z = 10 * (1 - 16 / X).
pub const BMI_CELL: LmsEntry = LmsEntry {
    l: -1.0,
    m: 16.0,
    s: 0.1,
};

/// L = 0, M = 20, S = 0.1: z = ln(X / 20) / 0.1.
pub const LOG_CELL: LmsEntry = LmsEntry {
    l: 0.0,
    m: 20.0,
    s: 0.1,
};

pub fn fixture() -> Fixture {
    let mut map = BTreeMap::new();
    let mut put = |indicator: Indicator, sex: Sex, age: u16, entry: LmsEntry| {
        map.insert((indicator, ReferenceKey::new(sex, age)), entry);
    };
    for age in [61, 100, 228] {
        put(Indicator::BmiForAge, Sex::Male, age, BMI_CELL);
        put(
            Indicator::HeightForAge,
            Sex::Male,
            age,
            LmsEntry::new(1.0, 130.0, 0.04),
        );
    }
    put(Indicator::BmiForAge, Sex::Female, 150, LOG_CELL);
    put(Indicator::BmiForAge, Sex::Female, 228, LOG_CELL);
    put(
        Indicator::HeightForAge,
        Sex::Female,
        110,
        LmsEntry::new(1.0, 135.0, 0.045),
    );
    // A skewed cell under the height indicator to show it is never restricted.
    put(Indicator::HeightForAge, Sex::Male, 120, BMI_CELL);
    put(
        Indicator::BmiForAge,
        Sex::Female,
        200,
        LmsEntry::new(-1.0, 0.0, 0.1),
    );
    map
}
