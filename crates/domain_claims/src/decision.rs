//! Decision workflow
//!
//! Decisions are append-only. Approving or rejecting appends an active
//! decision; undoing appends a row marked `undone` that supersedes the
//! decision it reverses. A claim has at most one active decision: the
//! latest row, unless that row is an undo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, instrument};

use core_kernel::{DecisionId, UserId};

use crate::claim::ClaimRecord;
use crate::error::{ClaimError, DecisionError};

/// Outcome of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionResult {
    Approved,
    Rejected,
}

/// Why a claim was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectedReason {
    IneligibleSubject,
    IneligibleYear,
    IneligibleSchool,
    IneligibleQualification,
    NoQtsOrQtls,
    Duplicate,
    NoResponse,
    Other,
}

/// One row of a claim's decision history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub result: DecisionResult,
    /// Empty for approvals
    pub rejected_reasons: BTreeSet<RejectedReason>,
    pub notes: Option<String>,
    /// Service operator who made the decision, `None` when automated
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    /// True for a row that reverses an earlier decision
    pub undone: bool,
    /// Decision this row reverses
    pub supersedes: Option<DecisionId>,
}

impl Decision {
    /// Whether the row is an approval or rejection that has not been undone
    pub fn is_active(&self) -> bool {
        !self.undone
    }
}

fn has_note(notes: &Option<String>) -> bool {
    notes.as_deref().is_some_and(|note| !note.trim().is_empty())
}

impl ClaimRecord {
    /// The decision currently in force, if any
    pub fn active_decision(&self) -> Option<&Decision> {
        self.decisions.last().filter(|decision| decision.is_active())
    }

    /// Submitted, not on hold and without an active decision
    pub fn approvable(&self) -> bool {
        self.is_submitted() && !self.held && self.active_decision().is_none()
    }

    pub fn rejectable(&self) -> bool {
        self.approvable()
    }

    /// An approval cannot be undone once it has been paid
    pub fn decision_undoable(&self) -> bool {
        match self.active_decision() {
            Some(decision) => !(decision.result == DecisionResult::Approved && self.payment_id.is_some()),
            None => false,
        }
    }

    /// Approves the claim
    ///
    /// # Errors
    ///
    /// `NotApprovable` unless [`Self::approvable`], and
    /// `NoteRequiredWhenAutomated` for an automated approval without a note.
    #[instrument(skip(self, notes), fields(claim_id = %self.id))]
    pub fn approve(
        &mut self,
        created_by: Option<UserId>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&Decision, ClaimError> {
        if !self.approvable() {
            return Err(DecisionError::NotApprovable.into());
        }
        if created_by.is_none() && !has_note(&notes) {
            return Err(DecisionError::NoteRequiredWhenAutomated.into());
        }

        let decision = self.append_decision(DecisionResult::Approved, BTreeSet::new(), notes, created_by, now);
        info!(decision_id = %decision.id, "Claim approved");
        Ok(decision)
    }

    /// Rejects the claim for at least one reason
    #[instrument(skip(self, notes), fields(claim_id = %self.id))]
    pub fn reject(
        &mut self,
        rejected_reasons: BTreeSet<RejectedReason>,
        created_by: Option<UserId>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&Decision, ClaimError> {
        if !self.rejectable() {
            return Err(DecisionError::NotRejectable.into());
        }
        if rejected_reasons.is_empty() {
            return Err(DecisionError::RejectedReasonsRequired.into());
        }
        if rejected_reasons.contains(&RejectedReason::Other) && !has_note(&notes) {
            return Err(DecisionError::NoteRequiredForOtherReason.into());
        }
        if created_by.is_none() && !has_note(&notes) {
            return Err(DecisionError::NoteRequiredWhenAutomated.into());
        }

        let decision = self.append_decision(DecisionResult::Rejected, rejected_reasons, notes, created_by, now);
        info!(decision_id = %decision.id, "Claim rejected");
        Ok(decision)
    }

    /// Reverses the active decision by appending an undo row
    #[instrument(skip(self, notes), fields(claim_id = %self.id))]
    pub fn undo_decision(
        &mut self,
        created_by: Option<UserId>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&Decision, ClaimError> {
        if !self.decision_undoable() {
            return Err(DecisionError::NotUndoable.into());
        }
        if created_by.is_none() && !has_note(&notes) {
            return Err(DecisionError::NoteRequiredWhenAutomated.into());
        }
        let Some(active) = self.active_decision().cloned() else {
            return Err(DecisionError::NotUndoable.into());
        };

        self.decisions.push(Decision {
            id: DecisionId::new_v7(),
            result: active.result,
            rejected_reasons: active.rejected_reasons,
            notes,
            created_by,
            created_at: now,
            undone: true,
            supersedes: Some(active.id),
        });
        self.updated_at = now;

        let decision = &self.decisions[self.decisions.len() - 1];
        info!(decision_id = %decision.id, superseded = %active.id, "Decision undone");
        Ok(decision)
    }

    fn append_decision(
        &mut self,
        result: DecisionResult,
        rejected_reasons: BTreeSet<RejectedReason>,
        notes: Option<String>,
        created_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> &Decision {
        self.decisions.push(Decision {
            id: DecisionId::new_v7(),
            result,
            rejected_reasons,
            notes,
            created_by,
            created_at: now,
            undone: false,
            supersedes: None,
        });
        self.updated_at = now;
        &self.decisions[self.decisions.len() - 1]
    }
}
