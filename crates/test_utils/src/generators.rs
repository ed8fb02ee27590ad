//! Property-Based Test Generators
//!
//! Provides proptest strategies for answer maps as journey forms submit
//! them. Every generated map is accepted by the claim it is meant for;
//! answers are left out at random to model a journey part way through.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use domain_eligibility::School;

use crate::fixtures::{school_value, SchoolFixtures};

/// Strategy for picking one of the fixture schools
pub fn school_strategy() -> impl Strategy<Value = School> {
    proptest::sample::select(SchoolFixtures::all().to_vec())
}

/// Strategy for subject answers, "none of the above" included
pub fn itt_subject_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("chemistry"),
        Just("computing"),
        Just("foreign_languages"),
        Just("mathematics"),
        Just("physics"),
        Just("none_of_the_above"),
    ]
}

/// Strategy for training year answers offered in 2022/2023
pub fn itt_academic_year_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("2017/2018"),
        Just("2018/2019"),
        Just("2019/2020"),
        Just("2020/2021"),
        Just("2021/2022"),
        Just("none_of_the_above"),
    ]
}

pub fn qualification_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("postgraduate_itt"),
        Just("undergraduate_itt"),
        Just("assessment_only"),
        Just("overseas_recognition"),
    ]
}

fn optional_bool() -> impl Strategy<Value = Option<bool>> {
    proptest::option::of(any::<bool>())
}

fn insert<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

/// Strategy for a partial set of combined journey eligibility answers
pub fn combined_eligibility_strategy() -> impl Strategy<Value = Map<String, Value>> {
    (
        proptest::option::of(school_strategy()),
        optional_bool(),
        optional_bool(),
        optional_bool(),
        optional_bool(),
        (optional_bool(), optional_bool()),
        proptest::option::of(qualification_strategy()),
        proptest::option::of(itt_academic_year_strategy()),
        proptest::option::of(itt_subject_strategy()),
        optional_bool(),
        optional_bool(),
    )
        .prop_map(
            |(school, nqt, supply, entire_term, directly, (performance, disciplinary), qualification, itt_year, subject, degree, teaching)| {
                let mut map = Map::new();
                insert(&mut map, "current_school", school.as_ref().map(school_value));
                insert(&mut map, "nqt_in_academic_year_after_itt", nqt);
                insert(&mut map, "employed_as_supply_teacher", supply);
                insert(&mut map, "has_entire_term_contract", entire_term);
                insert(&mut map, "employed_directly", directly);
                insert(&mut map, "subject_to_formal_performance_action", performance);
                insert(&mut map, "subject_to_disciplinary_action", disciplinary);
                insert(&mut map, "qualification", qualification);
                insert(&mut map, "itt_academic_year", itt_year);
                insert(&mut map, "eligible_itt_subject", subject);
                insert(&mut map, "eligible_degree_subject", degree);
                insert(&mut map, "teaching_subject_now", teaching);
                map
            },
        )
}

/// Strategy for the answers that steer the personal and payment pages
pub fn claimant_routing_strategy() -> impl Strategy<Value = Map<String, Value>> {
    (
        optional_bool(),
        optional_bool(),
        proptest::option::of(prop_oneof![Just("personal_bank_account"), Just("building_society")]),
        optional_bool(),
        proptest::option::of(prop_oneof![
            Just("england"),
            Just("northern_ireland"),
            Just("scotland"),
            Just("wales"),
        ]),
        optional_bool(),
    )
        .prop_map(|(from_lookup, mobile, payment, student_loan, country, postgraduate)| {
            let mut map = Map::new();
            insert(&mut map, "address_from_lookup", from_lookup);
            insert(&mut map, "provide_mobile_number", mobile);
            insert(&mut map, "bank_or_building_society", payment);
            insert(&mut map, "has_student_loan", student_loan);
            insert(&mut map, "student_loan_country", country);
            insert(&mut map, "has_masters_doctoral_loan", postgraduate);
            map
        })
}

/// Strategy for a partial set of student loans eligibility answers
pub fn student_loans_eligibility_strategy() -> impl Strategy<Value = Map<String, Value>> {
    (
        proptest::option::of(prop_oneof![Just("before_cut_off_date"), Just("on_or_after_cut_off_date")]),
        proptest::option::of(school_strategy()),
        optional_bool(),
        proptest::option::of(prop_oneof![
            Just("claim_school"),
            Just("different_school"),
            Just("no_longer_teaching"),
        ]),
        proptest::option::of(school_strategy()),
        optional_bool(),
        optional_bool(),
        proptest::option::of(0u32..=5000u32),
    )
        .prop_map(
            |(qts, claim_school, taught, employment, current_school, leadership, duties, repayment)| {
                let mut map = Map::new();
                insert(&mut map, "qts_award_year", qts);
                insert(&mut map, "claim_school", claim_school.as_ref().map(school_value));
                insert(&mut map, "taught_eligible_subjects", taught);
                insert(&mut map, "employment_status", employment);
                insert(&mut map, "current_school", current_school.as_ref().map(school_value));
                insert(&mut map, "had_leadership_position", leadership);
                insert(&mut map, "mostly_performed_leadership_duties", duties);
                insert(&mut map, "student_loan_repayment_amount", repayment.map(|amount| json!(amount.to_string())));
                map
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn combined_answers_only_use_known_keys(answers in combined_eligibility_strategy()) {
            prop_assert!(answers.len() <= 12);
            prop_assert!(!answers.contains_key("qts_award_year"));
        }

        #[test]
        fn school_values_carry_a_name(school in school_strategy()) {
            prop_assert!(school_value(&school)["name"].is_string());
        }
    }
}
