//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{AcademicYear, ClaimId, PortError};
use domain_eligibility::{EligibilityError, Policy};

/// Broad classification of a failure
///
/// Validation failures are shown to the user; everything else is an
/// operational failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Policy configuration is missing or inconsistent
    Configuration,
    /// The user supplied an answer or decision that is not acceptable
    Validation,
    /// Internal state would become inconsistent
    Integrity,
    /// The claim store failed
    Store,
}

/// Errors raised by decision workflow rules
///
/// Messages are shown to service operators as written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("This claim cannot be approved")]
    NotApprovable,

    #[error("This claim cannot be rejected")]
    NotRejectable,

    #[error("This claim cannot have its decision undone")]
    NotUndoable,

    #[error("At least one reason is required")]
    RejectedReasonsRequired,

    #[error("You must enter a reason for rejecting this claim in the decision note")]
    NoteRequiredForOtherReason,

    #[error("You must add a note when the decision is automated")]
    NoteRequiredWhenAutomated,
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error("Store error: {0}")]
    Store(#[from] PortError),

    #[error("Invalid answer for {attribute}: {message}")]
    InvalidAnswer { attribute: String, message: String },

    #[error("No policy can be selected for this claim")]
    UnselectablePolicy,

    #[error("Claim has no record for {0}")]
    PolicyNotInClaim(Policy),

    #[error("A claim needs at least one policy record")]
    EmptyAggregate,

    #[error("Claim has more than one record for {0}")]
    DuplicatePolicy(Policy),

    #[error("No current academic year is configured for {0}")]
    MissingPolicyAcademicYear(Policy),

    #[error("Policies in one journey have different academic years: {years:?}")]
    AmbiguousPolicyAcademicYear { years: Vec<AcademicYear> },

    #[error("Claim for {0} is not eligible to be submitted")]
    NotEligible(Policy),

    #[error("Claim {0} has already been submitted")]
    AlreadySubmitted(ClaimId),

    #[error("Claim {0} has not been submitted")]
    NotSubmitted(ClaimId),

    #[error("Award amount cannot be changed for {0}")]
    AwardAmountNotEditable(Policy),

    #[error("Enter a positive amount up to £{max} (inclusive)")]
    AwardAmountOutOfRange { amount: Decimal, max: Decimal },

    #[error("Enter top up amount")]
    TopupAmountRequired,

    #[error("Enter a positive amount up to {remaining} (inclusive)")]
    TopupAmountOutOfRange { remaining: String },

    #[error("Claim {0} has no approved decision to pay")]
    NotPayable(ClaimId),
}

impl ClaimError {
    pub fn invalid_answer(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        ClaimError::InvalidAnswer {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Classifies the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::Eligibility(error) => match error {
                EligibilityError::UnknownAttributes { .. } => ErrorKind::Integrity,
                EligibilityError::ClaimYearOutOfRange { .. }
                | EligibilityError::IttYearOutOfRange { .. } => ErrorKind::Configuration,
                EligibilityError::InvalidAnswer { .. }
                | EligibilityError::AwardAmountOutOfRange { .. }
                | EligibilityError::UnknownPolicy(_)
                | EligibilityError::UnknownJourney(_) => ErrorKind::Validation,
            },
            ClaimError::Decision(DecisionError::NotUndoable) => ErrorKind::Integrity,
            ClaimError::Decision(_)
            | ClaimError::InvalidAnswer { .. }
            | ClaimError::NotEligible(_)
            | ClaimError::AwardAmountNotEditable(_)
            | ClaimError::AwardAmountOutOfRange { .. }
            | ClaimError::TopupAmountRequired
            | ClaimError::TopupAmountOutOfRange { .. }
            | ClaimError::NotPayable(_) => ErrorKind::Validation,
            ClaimError::Store(_) => ErrorKind::Store,
            ClaimError::MissingPolicyAcademicYear(_)
            | ClaimError::AmbiguousPolicyAcademicYear { .. } => ErrorKind::Configuration,
            ClaimError::UnselectablePolicy
            | ClaimError::PolicyNotInClaim(_)
            | ClaimError::EmptyAggregate
            | ClaimError::DuplicatePolicy(_)
            | ClaimError::AlreadySubmitted(_)
            | ClaimError::NotSubmitted(_) => ErrorKind::Integrity,
        }
    }

    /// Returns true if the error should be shown to the user as a validation message
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
