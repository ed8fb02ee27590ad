//! Claimant answers shared by every policy
//!
//! These are the personal, contact, payment and student loan details asked
//! for after the eligibility questions. They do not affect eligibility.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClaimError;

/// How the claimant wants to be paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    PersonalBankAccount,
    BuildingSociety,
}

/// Gender as recorded by the claimant's payroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollGender {
    Female,
    Male,
    DontKnow,
}

/// Where the claimant's student loan was taken out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLoanCountry {
    England,
    NorthernIreland,
    Scotland,
    Wales,
}

impl StudentLoanCountry {
    /// Scottish and Northern Irish loans have a single repayment plan
    pub fn has_single_plan(&self) -> bool {
        matches!(self, StudentLoanCountry::Scotland | StudentLoanCountry::NorthernIreland)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLoanCourses {
    OneCourse,
    TwoOrMoreCourses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLoanStartDate {
    BeforeFirstSeptember2012,
    OnOrAfterFirstSeptember2012,
}

/// Answers to the claim questions that follow eligibility
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimantAnswers {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub national_insurance_number: Option<String>,

    /// Postcode entered on the address search page
    pub postcode: Option<String>,
    /// Whether the address was chosen from postcode search results
    pub address_from_lookup: Option<bool>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub address_line_4: Option<String>,

    pub email_address: Option<String>,
    pub email_verified: Option<bool>,
    pub provide_mobile_number: Option<bool>,
    pub mobile_number: Option<String>,
    pub mobile_verified: Option<bool>,

    pub bank_or_building_society: Option<PaymentMethod>,
    pub banking_name: Option<String>,
    pub bank_sort_code: Option<String>,
    pub bank_account_number: Option<String>,
    pub building_society_roll_number: Option<String>,

    pub payroll_gender: Option<PayrollGender>,
    /// Seven digit teacher reference number
    pub teacher_reference_number: Option<String>,

    pub has_student_loan: Option<bool>,
    pub student_loan_country: Option<StudentLoanCountry>,
    pub student_loan_courses: Option<StudentLoanCourses>,
    pub student_loan_start_date: Option<StudentLoanStartDate>,
    pub has_masters_doctoral_loan: Option<bool>,
    pub postgraduate_masters_loan: Option<bool>,
    pub postgraduate_doctoral_loan: Option<bool>,
}

impl ClaimantAnswers {
    /// Keys accepted by [`Self::merge`]
    pub const FIELDS: &'static [&'static str] = &[
        "first_name",
        "middle_name",
        "surname",
        "date_of_birth",
        "national_insurance_number",
        "postcode",
        "address_from_lookup",
        "address_line_1",
        "address_line_2",
        "address_line_3",
        "address_line_4",
        "email_address",
        "email_verified",
        "provide_mobile_number",
        "mobile_number",
        "mobile_verified",
        "bank_or_building_society",
        "banking_name",
        "bank_sort_code",
        "bank_account_number",
        "building_society_roll_number",
        "payroll_gender",
        "teacher_reference_number",
        "has_student_loan",
        "student_loan_country",
        "student_loan_courses",
        "student_loan_start_date",
        "has_masters_doctoral_loan",
        "postgraduate_masters_loan",
        "postgraduate_doctoral_loan",
    ];

    /// Returns true if the key names a claimant answer
    pub fn is_field(key: &str) -> bool {
        Self::FIELDS.contains(&key)
    }

    /// Overwrites the given fields, leaving the rest untouched
    ///
    /// Every key must be one of [`Self::FIELDS`]. Nothing changes if any
    /// value fails to parse.
    pub fn merge(&mut self, fields: &Map<String, Value>) -> Result<(), ClaimError> {
        let mut current = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(ClaimError::invalid_answer("claimant_answers", e.to_string())),
        };

        for (key, value) in fields {
            if !Self::is_field(key) {
                return Err(ClaimError::invalid_answer(key.as_str(), "not a claimant answer"));
            }
            current.insert(key.clone(), value.clone());
        }

        let merged: ClaimantAnswers = serde_json::from_value(Value::Object(current)).map_err(|e| {
            let attribute = fields.keys().cloned().collect::<Vec<_>>().join(", ");
            ClaimError::invalid_answer(attribute, e.to_string())
        })?;
        *self = merged;
        Ok(())
    }

    /// Returns true if the field holds an answer
    ///
    /// Blank text does not count, and verification flags count only once
    /// they are true.
    pub fn is_answered(&self, field: &str) -> bool {
        let Ok(Value::Object(map)) = serde_json::to_value(self) else {
            return false;
        };

        match map.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(verified)) if field.ends_with("_verified") => *verified,
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(_) => true,
        }
    }

    /// Full name as it appears on payroll
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.surname]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_fields_match_serialized_keys() {
        let value = serde_json::to_value(ClaimantAnswers::default()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for field in ClaimantAnswers::FIELDS {
            assert!(keys.contains(field), "missing {}", field);
        }
        assert_eq!(keys.len(), ClaimantAnswers::FIELDS.len());
    }

    #[test]
    fn test_merge_keeps_other_fields() {
        let mut answers = ClaimantAnswers {
            first_name: Some("Jo".to_string()),
            ..ClaimantAnswers::default()
        };
        answers
            .merge(&object(json!({ "surname": "Bloggs", "has_student_loan": true })))
            .unwrap();

        assert_eq!(answers.first_name.as_deref(), Some("Jo"));
        assert_eq!(answers.surname.as_deref(), Some("Bloggs"));
        assert_eq!(answers.has_student_loan, Some(true));
        assert_eq!(answers.full_name(), "Jo Bloggs");
    }

    #[test]
    fn test_is_answered() {
        let answers = ClaimantAnswers {
            first_name: Some("  ".to_string()),
            surname: Some("Bloggs".to_string()),
            email_verified: Some(false),
            has_student_loan: Some(false),
            ..ClaimantAnswers::default()
        };

        assert!(!answers.is_answered("first_name"));
        assert!(answers.is_answered("surname"));
        assert!(!answers.is_answered("email_verified"));
        assert!(answers.is_answered("has_student_loan"));
        assert!(!answers.is_answered("not_a_field"));
    }

    #[test]
    fn test_merge_rejects_bad_value_without_changes() {
        let mut answers = ClaimantAnswers::default();
        let result = answers.merge(&object(json!({
            "surname": "Bloggs",
            "student_loan_country": "atlantis",
        })));

        assert!(matches!(result, Err(ClaimError::InvalidAnswer { .. })));
        assert_eq!(answers, ClaimantAnswers::default());
    }

    #[test]
    fn test_single_plan_countries() {
        assert!(StudentLoanCountry::Scotland.has_single_plan());
        assert!(StudentLoanCountry::NorthernIreland.has_single_plan());
        assert!(!StudentLoanCountry::England.has_single_plan());
    }
}
