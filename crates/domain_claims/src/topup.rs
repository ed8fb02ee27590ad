//! Top-ups paid on top of an approved award

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{PaymentId, TopupId, UserId};

use crate::claim::ClaimRecord;
use crate::decision::DecisionResult;
use crate::error::ClaimError;

/// An extra amount paid on an approved claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topup {
    pub id: TopupId,
    pub award_amount: Decimal,
    /// Payroll payment the top-up was paid in
    pub payment_id: Option<PaymentId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Topup {
    pub fn is_payrolled(&self) -> bool {
        self.payment_id.is_some()
    }
}

impl ClaimRecord {
    /// Adds a top-up to an approved claim
    ///
    /// The award plus every top-up must stay between one pound and `max`.
    pub fn add_topup(
        &mut self,
        award_amount: Option<Decimal>,
        max: Decimal,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<&Topup, ClaimError> {
        let Some(award_amount) = award_amount else {
            return Err(ClaimError::TopupAmountRequired);
        };
        let policy = self.policy();
        if !policy.award_amount_editable() {
            return Err(ClaimError::AwardAmountNotEditable(policy));
        }
        let approved = self
            .active_decision()
            .is_some_and(|decision| decision.result == DecisionResult::Approved);
        if !approved {
            return Err(ClaimError::NotPayable(self.id));
        }

        let current = self.award_amount_with_topups();
        let total = current + award_amount;
        if total < Decimal::ONE || total > max {
            return Err(ClaimError::TopupAmountOutOfRange {
                remaining: pounds(max - current),
            });
        }

        self.topups.push(Topup {
            id: TopupId::new_v7(),
            award_amount,
            payment_id: None,
            created_by,
            created_at: now,
        });
        self.updated_at = now;

        let topup = &self.topups[self.topups.len() - 1];
        info!(claim_id = %self.id, topup_id = %topup.id, amount = %award_amount, "Top-up added");
        Ok(topup)
    }
}

/// Formats an amount as pounds and pence with thousands separators
pub fn pounds(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, pence) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}£{}.{}", sign, grouped, pence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pounds_formatting() {
        assert_eq!(pounds(dec!(2000)), "£2,000.00");
        assert_eq!(pounds(dec!(999.5)), "£999.50");
        assert_eq!(pounds(dec!(1234567.891)), "£1,234,567.89");
        assert_eq!(pounds(Decimal::ZERO), "£0.00");
    }
}
