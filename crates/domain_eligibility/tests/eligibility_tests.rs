//! Comprehensive tests for domain_eligibility

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Map, Value};

use core_kernel::AcademicYear;

use domain_eligibility::subject_eligibility::{
    current_and_future_subjects, selectable_itt_years, selectable_subjects, set_a_reminder,
};
use domain_eligibility::{
    AwardTable, CohortAnswers, EarlyCareerPaymentsEligibility, Eligibility, EligibilityAnswer,
    EligibilityAttribute, EligibilityCheck, EligibilityError, EligibilityStatus, IneligibilityReason,
    IttAcademicYear, IttSubject, LevellingUpPremiumAward, LevellingUpPremiumPaymentsEligibility,
    Policy, Qualification, School,
};

fn year(start: u16) -> AcademicYear {
    AcademicYear::new(start)
}

fn ecp_school(uplift: bool) -> School {
    School {
        eligible_for_early_career_payments: true,
        eligible_for_early_career_payments_as_uplift: uplift,
        ..School::new("Penistone Grammar School", 106653)
    }
}

fn lup_school(claim_year: AcademicYear, amount: Decimal) -> School {
    School {
        levelling_up_premium_awards: vec![LevellingUpPremiumAward {
            academic_year: claim_year,
            award_amount: amount,
        }],
        ..School::new("Hampstead School", 100049)
    }
}

fn combined_school() -> School {
    School {
        eligible_for_early_career_payments: true,
        ..lup_school(year(2022), dec!(2000))
    }
}

/// Answers that pass every question, for mathematics trained in 2019/2020
fn favourable_answers(school: School) -> CohortAnswers {
    CohortAnswers {
        nqt_in_academic_year_after_itt: Some(true),
        current_school: Some(school),
        employed_as_supply_teacher: Some(false),
        subject_to_formal_performance_action: Some(false),
        subject_to_disciplinary_action: Some(false),
        qualification: Some(Qualification::PostgraduateItt),
        eligible_itt_subject: Some(IttSubject::Mathematics),
        teaching_subject_now: Some(true),
        itt_academic_year: Some(IttAcademicYear::Year(year(2019))),
        ..CohortAnswers::default()
    }
}

fn trainee_answers(school: School, subject: IttSubject) -> CohortAnswers {
    CohortAnswers {
        nqt_in_academic_year_after_itt: Some(false),
        current_school: Some(school),
        qualification: Some(Qualification::PostgraduateItt),
        eligible_itt_subject: Some(subject),
        ..CohortAnswers::default()
    }
}

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

// ============================================================================
// Award Table Tests
// ============================================================================

mod award_table_tests {
    use super::*;
    use domain_eligibility::CohortKey;

    #[test]
    fn test_exact_lookup() {
        let table = AwardTable::early_career_payments();
        let entries = table.exact(CohortKey::new(IttSubject::Mathematics, year(2019), year(2022)));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].base_amount, dec!(5000));
        assert_eq!(entries[0].uplift_amount, dec!(7500));
    }

    #[test]
    fn test_partial_current_spans_claim_years() {
        let table = AwardTable::early_career_payments();
        let claim_years: Vec<_> = table
            .partial_current(IttSubject::Physics, year(2020))
            .iter()
            .map(|entry| entry.key.claim_year)
            .collect();
        assert_eq!(claim_years, vec![year(2022), year(2023), year(2024)]);
    }

    #[test]
    fn test_partial_first_follows_table_order() {
        let table = AwardTable::early_career_payments();
        let entry = table.partial_first(IttSubject::Mathematics, year(2022)).unwrap();
        assert_eq!(entry.key.itt_year, year(2019));
    }

    #[test]
    fn test_max_uplift_amount() {
        assert_eq!(AwardTable::early_career_payments().max_uplift_amount(), dec!(7500));
    }
}

// ============================================================================
// Subject Eligibility Tests
// ============================================================================

mod subject_eligibility_tests {
    use super::*;

    #[test]
    fn test_selectable_itt_years_are_five_preceding_years() {
        assert_eq!(
            selectable_itt_years(year(2022)),
            vec![year(2017), year(2018), year(2019), year(2020), year(2021)]
        );
    }

    #[test]
    fn test_ecp_subjects_include_future_claim_years() {
        let subjects = current_and_future_subjects(
            Policy::EarlyCareerPayments,
            year(2022),
            IttAcademicYear::Year(year(2018)),
        )
        .unwrap();
        assert_eq!(subjects, vec![IttSubject::Mathematics]);
    }

    #[test]
    fn test_none_of_the_above_year_has_no_subjects() {
        let subjects = current_and_future_subjects(
            Policy::LevellingUpPremiumPayments,
            year(2022),
            IttAcademicYear::NoneOfTheAbove,
        )
        .unwrap();
        assert!(subjects.is_empty());
    }

    #[test]
    fn test_claim_year_outside_policy_years() {
        let result = current_and_future_subjects(
            Policy::LevellingUpPremiumPayments,
            year(2021),
            IttAcademicYear::Year(year(2019)),
        );
        assert!(matches!(result, Err(EligibilityError::ClaimYearOutOfRange { .. })));
    }

    #[test]
    fn test_itt_year_not_selectable() {
        let result = current_and_future_subjects(
            Policy::EarlyCareerPayments,
            year(2022),
            IttAcademicYear::Year(year(2012)),
        );
        assert!(matches!(result, Err(EligibilityError::IttYearOutOfRange { .. })));
    }

    #[test]
    fn test_selectable_subjects_end_with_none_of_the_above() {
        let subjects = selectable_subjects(
            &[Policy::EarlyCareerPayments, Policy::LevellingUpPremiumPayments],
            year(2022),
            IttAcademicYear::Year(year(2020)),
        );
        assert_eq!(
            subjects,
            vec![
                IttSubject::Chemistry,
                IttSubject::Computing,
                IttSubject::ForeignLanguages,
                IttSubject::Mathematics,
                IttSubject::Physics,
                IttSubject::NoneOfTheAbove,
            ]
        );
    }

    #[test]
    fn test_reminder_not_offered_in_final_year() {
        assert!(!set_a_reminder(year(2024), Some(IttAcademicYear::Year(year(2020)))));
    }
}

// ============================================================================
// Early-Career Payments Tests
// ============================================================================

mod early_career_tests {
    use super::*;

    #[test]
    fn test_blank_answers_are_undetermined() {
        let eligibility = EarlyCareerPaymentsEligibility::default();
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::Undetermined);
        assert_eq!(eligibility.award_amount(year(2022)), Decimal::ZERO);
        assert_eq!(eligibility.ineligibility_reason(year(2022)), None);
    }

    #[test]
    fn test_eligible_now_with_base_amount() {
        let eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(ecp_school(false)));
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::EligibleNow);
        assert_eq!(eligibility.award_amount(year(2022)), dec!(5000));
    }

    #[test]
    fn test_uplift_school_gets_uplift_amount() {
        let eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(ecp_school(true)));
        assert_eq!(eligibility.award_amount(year(2022)), dec!(7500));
    }

    #[test]
    fn test_eligible_later_for_cohort_paid_next_year() {
        let mut answers = favourable_answers(ecp_school(false));
        answers.itt_academic_year = Some(IttAcademicYear::Year(year(2018)));
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);

        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::EligibleLater);
        assert_eq!(eligibility.eligible_later_year(year(2022)), Some(year(2023)));
    }

    #[test]
    fn test_first_table_year_scenario() {
        let mut answers = favourable_answers(ecp_school(false));
        answers.itt_academic_year = Some(IttAcademicYear::Year(year(2018)));
        let eligibility = EarlyCareerPaymentsEligibility::new(answers.clone());
        assert_eq!(eligibility.status(year(2021)), EligibilityStatus::EligibleNow);
        assert_eq!(eligibility.award_amount(year(2021)), dec!(5000));

        answers.current_school = Some(ecp_school(true));
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);
        assert_eq!(eligibility.award_amount(year(2021)), dec!(7500));
    }

    #[test]
    fn test_claim_year_before_table_is_eligible_later() {
        let mut answers = favourable_answers(ecp_school(false));
        answers.itt_academic_year = Some(IttAcademicYear::Year(year(2018)));
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);

        assert_eq!(eligibility.status(year(2020)), EligibilityStatus::EligibleLater);
        assert_eq!(eligibility.eligible_later_year(year(2020)), Some(year(2021)));
    }

    #[test]
    fn test_later_entry_outranks_hard_predicate() {
        let eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(School::new("Other", 1)));
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::EligibleLater);
        assert_eq!(eligibility.ineligibility_reason(year(2022)), None);
    }

    #[test]
    fn test_ineligible_school() {
        let eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(School::new("Other", 1)));
        assert_eq!(eligibility.status(year(2024)), EligibilityStatus::Ineligible);
        assert_eq!(
            eligibility.ineligibility_reason(year(2024)),
            Some(IneligibilityReason::IneligibleCurrentSchool)
        );
    }

    #[test]
    fn test_supply_teacher_without_contract_is_generic() {
        let mut answers = favourable_answers(ecp_school(false));
        answers.employed_as_supply_teacher = Some(true);
        answers.has_entire_term_contract = Some(false);
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);

        assert_eq!(
            eligibility.ineligibility_reason(year(2024)),
            Some(IneligibilityReason::GenericIneligibility)
        );
    }

    #[test]
    fn test_excluded_cohort_is_ineligible() {
        let mut answers = favourable_answers(ecp_school(false));
        answers.itt_academic_year = Some(IttAcademicYear::NoneOfTheAbove);
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);

        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::Ineligible);
        assert_eq!(
            eligibility.ineligibility_reason(year(2022)),
            Some(IneligibilityReason::GenericIneligibility)
        );
    }

    #[test]
    fn test_trainee_with_none_of_the_above() {
        let eligibility = EarlyCareerPaymentsEligibility::new(trainee_answers(
            ecp_school(false),
            IttSubject::NoneOfTheAbove,
        ));
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::Ineligible);
        assert_eq!(
            eligibility.ineligibility_reason(year(2022)),
            Some(IneligibilityReason::IttSubjectNoneOfTheAbove)
        );
    }

    #[test]
    fn test_not_teaching_subject_now() {
        let mut answers = favourable_answers(ecp_school(false));
        answers.teaching_subject_now = Some(false);
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);

        assert_eq!(
            eligibility.ineligibility_reason(year(2024)),
            Some(IneligibilityReason::NotTeachingNowInEligibleIttSubject)
        );
    }

    #[test]
    fn test_stamped_amount_wins() {
        let mut eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(ecp_school(false)));
        eligibility.stamp_award_amount(dec!(4321));
        assert_eq!(eligibility.award_amount(year(2022)), dec!(4321));
        assert_eq!(eligibility.stamped_award_amount(), Some(dec!(4321)));
    }

    #[test]
    fn test_first_eligible_itt_academic_year() {
        let eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(ecp_school(false)));
        assert_eq!(eligibility.first_eligible_itt_academic_year(year(2022)), Some(year(2019)));
    }
}

// ============================================================================
// Levelling Up Premium Payments Tests
// ============================================================================

mod levelling_up_tests {
    use super::*;

    #[test]
    fn test_eligible_now_with_school_award() {
        let eligibility =
            LevellingUpPremiumPaymentsEligibility::new(favourable_answers(lup_school(year(2022), dec!(2000))));
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::EligibleNow);
        assert_eq!(eligibility.award_amount(year(2022)), dec!(2000));
    }

    #[test]
    fn test_school_without_award_for_year() {
        let eligibility =
            LevellingUpPremiumPaymentsEligibility::new(favourable_answers(lup_school(year(2023), dec!(2000))));
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::Ineligible);
        assert_eq!(
            eligibility.ineligibility_reason(year(2022)),
            Some(IneligibilityReason::IneligibleCurrentSchool)
        );
    }

    #[test]
    fn test_policy_not_running_before_first_year() {
        let eligibility =
            LevellingUpPremiumPaymentsEligibility::new(favourable_answers(lup_school(year(2021), dec!(2000))));
        assert_eq!(
            eligibility.ineligibility_reason(year(2021)),
            Some(IneligibilityReason::GenericIneligibility)
        );
    }

    #[test]
    fn test_none_of_the_above_with_eligible_degree() {
        let mut answers = favourable_answers(lup_school(year(2022), dec!(2000)));
        answers.eligible_itt_subject = Some(IttSubject::NoneOfTheAbove);
        let mut eligibility = LevellingUpPremiumPaymentsEligibility::new(answers);

        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::Undetermined);

        eligibility.eligible_degree_subject = Some(true);
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::EligibleNow);

        eligibility.eligible_degree_subject = Some(false);
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::Ineligible);
        assert_eq!(
            eligibility.ineligibility_reason(year(2022)),
            Some(IneligibilityReason::IttSubjectNoneOfTheAbove)
        );
    }

    #[test]
    fn test_foreign_languages_not_eligible() {
        let mut answers = favourable_answers(lup_school(year(2022), dec!(2000)));
        answers.eligible_itt_subject = Some(IttSubject::ForeignLanguages);
        let eligibility = LevellingUpPremiumPaymentsEligibility::new(answers);

        assert_eq!(
            eligibility.ineligibility_reason(year(2022)),
            Some(IneligibilityReason::IttSubjectNotEligible)
        );
    }

    #[test]
    fn test_trainee_at_eligible_school_is_eligible_later() {
        let eligibility = LevellingUpPremiumPaymentsEligibility::new(trainee_answers(
            lup_school(year(2022), dec!(2000)),
            IttSubject::Physics,
        ));
        assert_eq!(eligibility.status(year(2022)), EligibilityStatus::EligibleLater);
        assert_eq!(eligibility.eligible_later_year(year(2022)), Some(year(2023)));
    }

    #[test]
    fn test_trainee_in_final_year_is_ineligible() {
        let eligibility = LevellingUpPremiumPaymentsEligibility::new(trainee_answers(
            lup_school(year(2024), dec!(2000)),
            IttSubject::Physics,
        ));
        assert_eq!(eligibility.status(year(2024)), EligibilityStatus::Ineligible);
        assert_eq!(
            eligibility.ineligibility_reason(year(2024)),
            Some(IneligibilityReason::TraineeTeacher)
        );
    }

    #[test]
    fn test_subject_change_clears_degree_answer() {
        let mut eligibility =
            LevellingUpPremiumPaymentsEligibility::new(favourable_answers(lup_school(year(2022), dec!(2000))));
        eligibility.eligible_degree_subject = Some(true);

        eligibility
            .assign(EligibilityAnswer::EligibleIttSubject(Some(IttSubject::Physics)))
            .unwrap();
        let cleared = eligibility.reset_dependent_answers(&[]);

        assert!(cleared.contains(&EligibilityAttribute::EligibleDegreeSubject));
        assert!(cleared.contains(&EligibilityAttribute::TeachingSubjectNow));
        assert_eq!(eligibility.eligible_degree_subject, None);
    }
}

// ============================================================================
// Attribute Assignment Tests
// ============================================================================

mod assignment_tests {
    use super::*;

    #[test]
    fn test_assign_attributes_from_form() {
        let mut eligibility = EarlyCareerPaymentsEligibility::default();
        eligibility
            .assign_attributes(&map(json!({
                "qualification": "undergraduate_itt",
                "itt_academic_year": "2019/2020",
                "eligible_itt_subject": "mathematics",
            })))
            .unwrap();

        assert_eq!(eligibility.answers.qualification, Some(Qualification::UndergraduateItt));
        assert_eq!(
            eligibility.answers.itt_academic_year,
            Some(IttAcademicYear::Year(year(2019)))
        );
        assert_eq!(eligibility.changed_attributes().len(), 3);
    }

    #[test]
    fn test_sibling_attribute_is_ignored() {
        let mut eligibility = EarlyCareerPaymentsEligibility::default();
        let result = eligibility.assign_attributes(&map(json!({ "eligible_degree_subject": true })));

        assert!(result.is_ok());
        assert!(eligibility.changed_attributes().is_empty());
    }

    #[test]
    fn test_unknown_attribute_rejects_whole_map() {
        let mut eligibility = EarlyCareerPaymentsEligibility::default();
        let result = eligibility.assign_attributes(&map(json!({
            "eligible_degree_subject": true,
            "teaching_subject_now": true,
            "favourite_colour": "green",
        })));

        let error = result.unwrap_err();
        assert!(error.unknown_keys().contains(&"favourite_colour".to_string()));
        assert!(error.unknown_keys().contains(&"eligible_degree_subject".to_string()));
        assert_eq!(eligibility.answers.teaching_subject_now, None);
    }

    #[test]
    fn test_invalid_value_applies_nothing() {
        let mut eligibility = EarlyCareerPaymentsEligibility::default();
        let result = eligibility.assign_attributes(&map(json!({
            "teaching_subject_now": true,
            "qualification": "apprenticeship",
        })));

        assert!(matches!(result, Err(EligibilityError::InvalidAnswer { .. })));
        assert_eq!(eligibility.answers.teaching_subject_now, None);
    }

    #[test]
    fn test_out_of_range_itt_year_is_an_invalid_answer() {
        let mut eligibility = EarlyCareerPaymentsEligibility::default();
        let result = eligibility.assign_attributes(&map(json!({ "itt_academic_year": "65535/0" })));

        assert!(matches!(result, Err(EligibilityError::InvalidAnswer { .. })));
        assert_eq!(eligibility.answers.itt_academic_year, None);
    }

    #[test]
    fn test_levelling_up_has_no_ignore_list() {
        let mut eligibility = LevellingUpPremiumPaymentsEligibility::default();
        let result = eligibility.assign_attributes(&map(json!({ "qts_award_year": "before_cut_off_date" })));
        assert!(matches!(result, Err(EligibilityError::UnknownAttributes { .. })));
    }

    #[test]
    fn test_trainee_answer_sets_postgraduate_route() {
        let mut eligibility = EarlyCareerPaymentsEligibility::default();
        eligibility
            .assign(EligibilityAnswer::NqtInAcademicYearAfterItt(Some(false)))
            .unwrap();
        assert_eq!(eligibility.answers.qualification, Some(Qualification::PostgraduateItt));
    }

    #[test]
    fn test_reset_clears_transitively() {
        let mut eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(ecp_school(false)));
        eligibility
            .assign(EligibilityAnswer::IttAcademicYear(Some(IttAcademicYear::Year(year(2020)))))
            .unwrap();

        let cleared = eligibility.reset_dependent_answers(&[]);
        assert_eq!(
            cleared,
            vec![EligibilityAttribute::EligibleIttSubject, EligibilityAttribute::TeachingSubjectNow]
        );
        assert!(eligibility.reset_dependent_answers(&[]).is_empty());
    }

    #[test]
    fn test_forced_reset_without_changes() {
        let mut eligibility = EarlyCareerPaymentsEligibility::new(favourable_answers(ecp_school(false)));
        let cleared = eligibility.reset_dependent_answers(&[EligibilityAttribute::EligibleIttSubject]);
        assert_eq!(cleared, vec![EligibilityAttribute::TeachingSubjectNow]);
    }
}

// ============================================================================
// Eligibility Sum Type Tests
// ============================================================================

mod sum_type_tests {
    use super::*;

    #[test]
    fn test_for_policy_matches_policy() {
        for policy in Policy::ALL {
            assert_eq!(Eligibility::for_policy(policy).policy(), policy);
        }
    }

    #[test]
    fn test_forwarding_and_serialization() {
        let mut eligibility = Eligibility::for_policy(Policy::LevellingUpPremiumPayments);
        eligibility
            .assign_attributes(&map(json!({ "current_school": combined_school() })))
            .unwrap();

        let json = serde_json::to_value(&eligibility).unwrap();
        assert_eq!(json["policy"], "levelling_up_premium_payments");
        assert_eq!(json["answers"]["current_school"]["urn"], 100049);

        let restored: Eligibility = serde_json::from_value(json).unwrap();
        assert_eq!(restored.cohort_answers(), eligibility.cohort_answers());
        assert!(restored.changed_attributes().is_empty());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn subject_strategy() -> impl Strategy<Value = IttSubject> {
    prop_oneof![
        Just(IttSubject::Chemistry),
        Just(IttSubject::Computing),
        Just(IttSubject::ForeignLanguages),
        Just(IttSubject::Mathematics),
        Just(IttSubject::Physics),
        Just(IttSubject::NoneOfTheAbove),
    ]
}

fn itt_year_strategy() -> impl Strategy<Value = IttAcademicYear> {
    prop_oneof![
        Just(IttAcademicYear::NoneOfTheAbove),
        (2016u16..2024).prop_map(|start| IttAcademicYear::Year(AcademicYear::new(start))),
    ]
}

fn school_strategy() -> impl Strategy<Value = School> {
    (any::<bool>(), any::<bool>(), prop::option::of(0u32..5000)).prop_map(|(ecp, uplift, lup)| {
        let mut school = School::new("Generated School", 123456);
        school.eligible_for_early_career_payments = ecp;
        school.eligible_for_early_career_payments_as_uplift = uplift;
        if let Some(amount) = lup {
            school.levelling_up_premium_awards = (2022u16..=2024)
                .map(|start| LevellingUpPremiumAward {
                    academic_year: AcademicYear::new(start),
                    award_amount: Decimal::from(amount),
                })
                .collect();
        }
        school
    })
}

prop_compose! {
    fn answers_strategy()(
        nqt in prop::option::of(any::<bool>()),
        school in prop::option::of(school_strategy()),
        supply in prop::option::of(any::<bool>()),
        contract in prop::option::of(any::<bool>()),
        directly in prop::option::of(any::<bool>()),
        performance in prop::option::of(any::<bool>()),
        disciplinary in prop::option::of(any::<bool>()),
        subject in prop::option::of(subject_strategy()),
        teaching in prop::option::of(any::<bool>()),
        itt_year in prop::option::of(itt_year_strategy()),
    ) -> CohortAnswers {
        CohortAnswers {
            nqt_in_academic_year_after_itt: nqt,
            current_school: school,
            employed_as_supply_teacher: supply,
            has_entire_term_contract: contract,
            employed_directly: directly,
            subject_to_formal_performance_action: performance,
            subject_to_disciplinary_action: disciplinary,
            qualification: Some(Qualification::PostgraduateItt),
            eligible_itt_subject: subject,
            teaching_subject_now: teaching,
            itt_academic_year: itt_year,
        }
    }
}

proptest! {
    #[test]
    fn prop_ecp_award_within_table_bounds(answers in answers_strategy(), start in 2021u16..=2024) {
        let eligibility = EarlyCareerPaymentsEligibility::new(answers);
        let amount = eligibility.award_amount(AcademicYear::new(start));
        prop_assert!(amount >= Decimal::ZERO);
        prop_assert!(amount <= AwardTable::early_career_payments().max_uplift_amount());
    }

    #[test]
    fn prop_no_school_means_no_award(answers in answers_strategy(), start in 2021u16..=2024) {
        let answers = CohortAnswers { current_school: None, ..answers };
        let claim_year = AcademicYear::new(start);
        prop_assert_eq!(
            EarlyCareerPaymentsEligibility::new(answers.clone()).award_amount(claim_year),
            Decimal::ZERO
        );
        prop_assert_eq!(
            LevellingUpPremiumPaymentsEligibility::new(answers).award_amount(claim_year),
            Decimal::ZERO
        );
    }

    #[test]
    fn prop_reason_only_when_ineligible(answers in answers_strategy(), start in 2021u16..=2024) {
        let claim_year = AcademicYear::new(start);
        for eligibility in [
            Eligibility::EarlyCareerPayments(EarlyCareerPaymentsEligibility::new(answers.clone())),
            Eligibility::LevellingUpPremiumPayments(LevellingUpPremiumPaymentsEligibility::new(answers.clone())),
        ] {
            let ineligible = eligibility.status(claim_year) == EligibilityStatus::Ineligible;
            prop_assert_eq!(eligibility.ineligibility_reason(claim_year).is_some(), ineligible);
        }
    }

    #[test]
    fn prop_reset_is_idempotent(answers in answers_strategy(), subject in subject_strategy()) {
        let mut eligibility = LevellingUpPremiumPaymentsEligibility::new(answers);
        eligibility.eligible_degree_subject = Some(true);
        eligibility.assign(EligibilityAnswer::EligibleIttSubject(Some(subject))).unwrap();

        eligibility.reset_dependent_answers(&[EligibilityAttribute::Qualification]);
        let snapshot = eligibility.clone();
        let cleared = eligibility.reset_dependent_answers(&[EligibilityAttribute::Qualification]);

        prop_assert!(cleared.is_empty());
        prop_assert_eq!(eligibility, snapshot);
    }
}
