//! Eligibility Domain
//!
//! This crate decides whether a teacher is eligible for a payment policy and
//! how much they would be awarded. Each policy has its own eligibility shape,
//! closed over by the [`Eligibility`] sum type and evaluated through the
//! [`EligibilityCheck`] capability trait.
//!
//! # Status Precedence
//!
//! ```text
//! eligible_now > eligible_later > ineligible > undetermined
//! ```
//!
//! Status is never stored. It is recomputed on every read from the answers
//! held by the shape, the claim academic year and the static award table.

pub mod policy;
pub mod school;
pub mod subject;
pub mod award_table;
pub mod subject_eligibility;
pub mod attributes;
pub mod status;
pub mod cohort;
pub mod early_career;
pub mod levelling_up;
pub mod student_loans;
pub mod eligibility;
pub mod error;

pub use policy::{Journey, Policy};
pub use school::{LevellingUpPremiumAward, School};
pub use subject::{IttAcademicYear, IttSubject, Qualification};
pub use award_table::{AwardEntry, AwardTable, CohortKey, EXCLUDED_ITT_COHORTS};
pub use attributes::{EligibilityAnswer, EligibilityAttribute};
pub use status::{EligibilityStatus, IneligibilityReason};
pub use cohort::CohortAnswers;
pub use early_career::EarlyCareerPaymentsEligibility;
pub use levelling_up::LevellingUpPremiumPaymentsEligibility;
pub use student_loans::{EmploymentStatus, QtsAwardYear, StudentLoansEligibility};
pub use eligibility::{Eligibility, EligibilityCheck};
pub use error::EligibilityError;
