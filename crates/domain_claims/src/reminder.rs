//! Reminders for claimants who will become eligible in a later year

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AcademicYear, ReminderId};
use domain_eligibility::subject_eligibility::set_a_reminder;
use domain_eligibility::{EligibilityCheck, IttAcademicYear, IttSubject};

use crate::aggregate::ClaimAggregate;
use crate::error::ClaimError;
use crate::ports::PolicyConfigurationProvider;

/// A request to be emailed when claims open in a later academic year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub full_name: String,
    pub email_address: String,
    pub email_verified: bool,
    pub itt_academic_year: Option<IttAcademicYear>,
    pub itt_subject: Option<IttSubject>,
    /// Academic year the reminder is for
    pub academic_year: AcademicYear,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Returns true if a reminder can be set for a claimant with the training year
    pub fn can_be_set(policy_year: AcademicYear, itt_academic_year: Option<IttAcademicYear>) -> bool {
        set_a_reminder(policy_year, itt_academic_year)
    }

    /// Creates a reminder for the academic year after the claim's
    ///
    /// # Errors
    ///
    /// Configuration errors from resolving the claim's academic year.
    /// Returns `Ok(None)` when no reminder can be set.
    pub fn for_claim(
        claim: &ClaimAggregate,
        config: &dyn PolicyConfigurationProvider,
        full_name: impl Into<String>,
        email_address: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Self>, ClaimError> {
        if !claim.reminder_eligible(config)? {
            return Ok(None);
        }

        let policy_year = claim.policy_academic_year(config)?;
        let eligibility = &claim.main_record()?.eligibility;
        Ok(Some(Self {
            id: ReminderId::new_v7(),
            full_name: full_name.into(),
            email_address: email_address.into(),
            email_verified: false,
            itt_academic_year: eligibility.itt_academic_year(),
            itt_subject: eligibility.cohort_answers().and_then(|answers| answers.eligible_itt_subject),
            academic_year: policy_year.next(),
            created_at: now,
        }))
    }

    pub fn verify_email(&mut self) {
        self.email_verified = true;
    }
}
