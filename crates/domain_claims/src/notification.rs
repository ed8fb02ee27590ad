//! Messages sent to claimants
//!
//! The engine decides which messages are warranted; delivery is the
//! [`NotificationSender`](crate::ports::NotificationSender) port's job.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{ClaimId, ReminderId};

use crate::claim::ClaimRecord;
use crate::decision::DecisionResult;
use crate::reminder::Reminder;
use crate::topup::pounds;

/// Days after submission before a claimant is told their claim is still being processed
pub const UPDATE_AFTER_DAYS: i64 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    ReminderEmailVerification,
    ReminderSet,
    ClaimSubmitted,
    ClaimApproved,
    ClaimRejected,
    ClaimUpdateAfterThreeWeeks,
}

/// An email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message_type: MessageType,
    pub email_address: String,
    pub subject: String,
    /// Values substituted into the message template
    pub personalisation: BTreeMap<String, String>,
    pub claim_id: Option<ClaimId>,
    pub reminder_id: Option<ReminderId>,
}

impl Notification {
    fn for_claim(claim: &ClaimRecord, message_type: MessageType, subject: String) -> Option<Self> {
        let email_address = claim.answers.email_address.clone()?;

        let mut personalisation = BTreeMap::new();
        personalisation.insert("first_name".to_string(), claim.answers.first_name.clone().unwrap_or_default());
        personalisation.insert("ref_number".to_string(), claim.reference.clone());
        personalisation.insert("support_email_address".to_string(), support_email(claim).to_string());

        Some(Self {
            message_type,
            email_address,
            subject,
            personalisation,
            claim_id: Some(claim.id),
            reminder_id: None,
        })
    }

    /// Confirmation sent once a claim is submitted
    pub fn claim_submitted(claim: &ClaimRecord) -> Option<Self> {
        if !claim.is_submitted() {
            return None;
        }
        let subject = format!("Your {} claim has been received", claim.policy().short_name().to_lowercase());
        Self::for_claim(claim, MessageType::ClaimSubmitted, subject)
    }

    /// Outcome of the claim's active decision
    pub fn decision_made(claim: &ClaimRecord) -> Option<Self> {
        let decision = claim.active_decision()?;
        let short_name = claim.policy().short_name().to_lowercase();

        match decision.result {
            DecisionResult::Approved => {
                let mut notification = Self::for_claim(
                    claim,
                    MessageType::ClaimApproved,
                    format!("Your {} claim has been approved", short_name),
                )?;
                notification
                    .personalisation
                    .insert("award_amount".to_string(), pounds(claim.award_amount_with_topups()));
                Some(notification)
            }
            DecisionResult::Rejected => {
                let mut notification = Self::for_claim(
                    claim,
                    MessageType::ClaimRejected,
                    format!("Your {} claim has been rejected", short_name),
                )?;
                let reasons = serde_json::to_value(&decision.rejected_reasons)
                    .ok()
                    .and_then(|value| value.as_array().cloned())
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|reason| reason.as_str().map(str::to_string))
                    .collect::<Vec<_>>()
                    .join(", ");
                notification.personalisation.insert("reasons".to_string(), reasons);
                Some(notification)
            }
        }
    }

    /// Progress update for a claim still undecided three weeks after submission
    pub fn update_after_three_weeks(claim: &ClaimRecord, now: DateTime<Utc>) -> Option<Self> {
        let submitted_at = claim.submitted_at?;
        if claim.active_decision().is_some() || now - submitted_at < Duration::days(UPDATE_AFTER_DAYS) {
            return None;
        }
        let subject = "We are still reviewing your claim".to_string();
        Self::for_claim(claim, MessageType::ClaimUpdateAfterThreeWeeks, subject)
    }

    /// One-time password sent to confirm a reminder's email address
    pub fn reminder_email_verification(reminder: &Reminder, one_time_password: &str) -> Self {
        let mut notification = Self::for_reminder(
            reminder,
            MessageType::ReminderEmailVerification,
            "Reminder email verification",
        );
        notification
            .personalisation
            .insert("one_time_password".to_string(), one_time_password.to_string());
        notification
    }

    pub fn reminder_set(reminder: &Reminder) -> Self {
        let mut notification = Self::for_reminder(reminder, MessageType::ReminderSet, "Your reminder has been set");
        notification
            .personalisation
            .insert("academic_year".to_string(), reminder.academic_year.to_string());
        notification
    }

    fn for_reminder(reminder: &Reminder, message_type: MessageType, subject: &str) -> Self {
        let mut personalisation = BTreeMap::new();
        personalisation.insert("full_name".to_string(), reminder.full_name.clone());

        Self {
            message_type,
            email_address: reminder.email_address.clone(),
            subject: subject.to_string(),
            personalisation,
            claim_id: None,
            reminder_id: Some(reminder.id),
        }
    }
}

fn support_email(claim: &ClaimRecord) -> &'static str {
    if claim.policy().is_combinable() {
        "earlycareerteacherpayments@digital.education.gov.uk"
    } else {
        "studentloanteacherpayments@digital.education.gov.uk"
    }
}
