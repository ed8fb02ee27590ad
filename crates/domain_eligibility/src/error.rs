//! Eligibility domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::AcademicYear;

use crate::policy::Policy;

/// Errors that can occur while assigning answers or evaluating eligibility
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EligibilityError {
    #[error("Unknown attributes: {}", keys.join(", "))]
    UnknownAttributes { keys: Vec<String> },

    #[error("Invalid answer for {attribute}: {message}")]
    InvalidAnswer { attribute: String, message: String },

    #[error("Award amount {amount} is outside 0 to {max}")]
    AwardAmountOutOfRange { amount: Decimal, max: Decimal },

    #[error("No award years configured for {policy} in {year}")]
    ClaimYearOutOfRange { policy: Policy, year: AcademicYear },

    #[error("ITT year {itt_year} is not selectable when claiming in {claim_year}")]
    IttYearOutOfRange {
        itt_year: AcademicYear,
        claim_year: AcademicYear,
    },

    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    #[error("Unknown journey: {0}")]
    UnknownJourney(String),
}

impl EligibilityError {
    pub fn invalid_answer(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        EligibilityError::InvalidAnswer {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Keys that were not recognised, if this is an unknown attributes error
    pub fn unknown_keys(&self) -> &[String] {
        match self {
            EligibilityError::UnknownAttributes { keys } => keys,
            _ => &[],
        }
    }
}
