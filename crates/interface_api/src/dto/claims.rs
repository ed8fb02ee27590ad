//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use core_kernel::{ClaimId, PaymentId, UserId};
use domain_claims::{ClaimRecord, Decision, DecisionResult, PolicyOption, RejectedReason};
use domain_eligibility::{EligibilityStatus, Policy};

#[derive(Debug, Deserialize, Validate)]
pub struct DecisionRequest {
    pub result: DecisionResult,
    #[serde(default)]
    pub rejected_reasons: BTreeSet<RejectedReason>,
    #[validate(length(max = 2000, message = "Notes must be 2000 characters or fewer"))]
    pub notes: Option<String>,
    /// Service operator making the decision, absent when automated
    pub created_by: Option<UserId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UndoDecisionRequest {
    #[validate(length(max = 2000, message = "Notes must be 2000 characters or fewer"))]
    pub notes: Option<String>,
    pub created_by: Option<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct HoldRequest {
    pub held: bool,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub payment_id: PaymentId,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub result: DecisionResult,
    pub rejected_reasons: BTreeSet<RejectedReason>,
    pub notes: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub undone: bool,
}

impl From<&Decision> for DecisionResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            result: decision.result,
            rejected_reasons: decision.rejected_reasons.clone(),
            notes: decision.notes.clone(),
            created_by: decision.created_by,
            created_at: decision.created_at,
            undone: decision.undone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub reference: String,
    pub policy: Policy,
    pub status: EligibilityStatus,
    pub award_amount: Decimal,
    pub award_amount_with_topups: Decimal,
    pub policy_options_provided: Vec<PolicyOption>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub held: bool,
    pub approvable: bool,
    pub decision_undoable: bool,
    pub payment_id: Option<PaymentId>,
    pub decisions: Vec<DecisionResponse>,
}

impl From<&ClaimRecord> for ClaimResponse {
    fn from(claim: &ClaimRecord) -> Self {
        Self {
            id: claim.id,
            reference: claim.reference.clone(),
            policy: claim.policy(),
            status: claim.status(),
            award_amount: claim.award_amount(),
            award_amount_with_topups: claim.award_amount_with_topups(),
            policy_options_provided: claim.policy_options_provided.clone(),
            submitted_at: claim.submitted_at,
            held: claim.held,
            approvable: claim.approvable(),
            decision_undoable: claim.decision_undoable(),
            payment_id: claim.payment_id,
            decisions: claim.decisions.iter().map(DecisionResponse::from).collect(),
        }
    }
}
