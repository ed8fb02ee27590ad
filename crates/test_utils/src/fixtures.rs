//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the claim engine.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Map, Value};

use core_kernel::AcademicYear;
use domain_claims::adapters::{InMemorySchoolDirectory, StaticPolicyConfiguration};
use domain_eligibility::{LevellingUpPremiumAward, School};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Academic year every fixture claim is made in
    pub fn claim_year() -> AcademicYear {
        AcademicYear::new(2022)
    }

    /// A moment inside the 2022/2023 claim window
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 11, 1, 9, 0, 0).unwrap()
    }
}

/// Fixture for policy configuration
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// Every policy configured for the fixture claim year
    pub fn policy_configuration() -> StaticPolicyConfiguration {
        StaticPolicyConfiguration::new(TemporalFixtures::claim_year())
    }
}

/// Standard levelling up premium award for fixture schools
pub const LEVELLING_UP_PREMIUM_AWARD: Decimal = dec!(2000);

static SCHOOLS: Lazy<Vec<School>> = Lazy::new(|| {
    vec![
        SchoolFixtures::early_career_payments_only(),
        SchoolFixtures::combined(),
        SchoolFixtures::levelling_up_premium_only(),
        SchoolFixtures::student_loans(),
        SchoolFixtures::ineligible(),
    ]
});

/// Fixture for school test data
pub struct SchoolFixtures;

impl SchoolFixtures {
    /// School eligible for early-career payments only
    pub fn early_career_payments_only() -> School {
        School {
            eligible_for_early_career_payments: true,
            ..School::new("Penistone Grammar School", 106653)
        }
    }

    /// School eligible for both combined policies
    pub fn combined() -> School {
        School {
            eligible_for_early_career_payments: true,
            levelling_up_premium_awards: vec![Self::levelling_up_award()],
            ..School::new("Hampstead School", 100049)
        }
    }

    /// School with a levelling up premium award but no early-career eligibility
    pub fn levelling_up_premium_only() -> School {
        School {
            levelling_up_premium_awards: vec![Self::levelling_up_award()],
            ..School::new("Oakfield Academy", 137212)
        }
    }

    pub fn student_loans() -> School {
        School {
            eligible_for_student_loans: true,
            ..School::new("Bridlington School", 118051)
        }
    }

    /// School eligible for nothing
    pub fn ineligible() -> School {
        School::new("Independent Hall", 109999)
    }

    /// Every fixture school, shared between tests
    pub fn all() -> &'static [School] {
        &SCHOOLS
    }

    /// Directory over every fixture school
    pub fn directory() -> InMemorySchoolDirectory {
        InMemorySchoolDirectory::new(SCHOOLS.clone())
    }

    fn levelling_up_award() -> LevellingUpPremiumAward {
        LevellingUpPremiumAward {
            academic_year: TemporalFixtures::claim_year(),
            award_amount: LEVELLING_UP_PREMIUM_AWARD,
        }
    }
}

/// Fixture for answer maps as submitted by journey forms
pub struct AnswerFixtures;

impl AnswerFixtures {
    /// Eligibility answers of a qualified mathematics teacher
    pub fn combined_eligibility(school: &School, itt_year: &str) -> Map<String, Value> {
        object(json!({
            "current_school": school_value(school),
            "nqt_in_academic_year_after_itt": true,
            "employed_as_supply_teacher": false,
            "subject_to_formal_performance_action": false,
            "subject_to_disciplinary_action": false,
            "qualification": "postgraduate_itt",
            "itt_academic_year": itt_year,
            "eligible_itt_subject": "mathematics",
            "teaching_subject_now": true,
        }))
    }

    /// Eligibility answers of an eligible student loans claimant
    pub fn student_loans_eligibility() -> Map<String, Value> {
        object(json!({
            "qts_award_year": "on_or_after_cut_off_date",
            "claim_school": school_value(&SchoolFixtures::student_loans()),
            "taught_eligible_subjects": true,
            "employment_status": "claim_school",
            "had_leadership_position": false,
            "student_loan_repayment_amount": "1000",
        }))
    }

    /// Personal, contact and payment answers with no student loan
    pub fn personal_details() -> Map<String, Value> {
        object(json!({
            "first_name": "Jo",
            "surname": "Bloggs",
            "date_of_birth": "1990-01-01",
            "national_insurance_number": "QQ123456C",
            "address_from_lookup": false,
            "address_line_1": "1 Test Road",
            "address_line_3": "Sheffield",
            "postcode": "S1 1AA",
            "email_address": "jo.bloggs@example.com",
            "email_verified": true,
            "provide_mobile_number": false,
            "bank_or_building_society": "personal_bank_account",
            "banking_name": "Jo Bloggs",
            "bank_sort_code": "123456",
            "bank_account_number": "12345678",
            "payroll_gender": "female",
            "teacher_reference_number": "1234567",
            "has_student_loan": false,
            "has_masters_doctoral_loan": false,
        }))
    }
}

/// Serialized form of a school as the school search returns it
pub fn school_value(school: &School) -> Value {
    serde_json::to_value(school).unwrap()
}

/// Unwraps a JSON object literal
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_school_has_award_for_claim_year() {
        let school = SchoolFixtures::combined();
        assert!(school.eligible_for_levelling_up_premium(TemporalFixtures::claim_year()));
        assert_eq!(SchoolFixtures::all().len(), 5);
    }
}
