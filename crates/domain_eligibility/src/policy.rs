//! Payment policies and the journeys that offer them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EligibilityError;

/// A payment policy a teacher can claim under
///
/// Variant order is significant: it is the order in which members of a
/// combined journey are consulted when looking for a preferred eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Early-career payments (ECP)
    EarlyCareerPayments,
    /// Levelling up premium payments (LUP)
    LevellingUpPremiumPayments,
    /// Student loan repayment reimbursement
    StudentLoans,
}

impl Policy {
    /// All known policies
    pub const ALL: [Policy; 3] = [
        Policy::EarlyCareerPayments,
        Policy::LevellingUpPremiumPayments,
        Policy::StudentLoans,
    ];

    /// Returns the machine name used in configuration and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::EarlyCareerPayments => "early_career_payments",
            Policy::LevellingUpPremiumPayments => "levelling_up_premium_payments",
            Policy::StudentLoans => "student_loans",
        }
    }

    /// Returns the display name shown to claimants
    ///
    /// Also used as the tie-break when ordering policy options offered to a
    /// claimant with equal award amounts.
    pub fn short_name(&self) -> &'static str {
        match self {
            Policy::EarlyCareerPayments => "Early-Career Payment",
            Policy::LevellingUpPremiumPayments => "Levelling Up Premium Payment",
            Policy::StudentLoans => "Student Loans",
        }
    }

    /// Returns true for policies that share a combined journey
    pub fn is_combinable(&self) -> bool {
        matches!(
            self,
            Policy::EarlyCareerPayments | Policy::LevellingUpPremiumPayments
        )
    }

    /// Returns true if service operators may amend the award amount
    pub fn award_amount_editable(&self) -> bool {
        self.is_combinable()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| EligibilityError::UnknownPolicy(s.to_string()))
    }
}

/// A claimant journey offering one or more policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Journey {
    /// Single-policy student loans journey
    StudentLoans,
    /// Combined early-career and levelling up premium journey
    AdditionalPayments,
}

impl Journey {
    /// Policies claimed through this journey, in record creation order
    pub fn policies(&self) -> &'static [Policy] {
        match self {
            Journey::StudentLoans => &[Policy::StudentLoans],
            Journey::AdditionalPayments => &[
                Policy::EarlyCareerPayments,
                Policy::LevellingUpPremiumPayments,
            ],
        }
    }

    /// Returns the URL segment for this journey
    pub fn routing_name(&self) -> &'static str {
        match self {
            Journey::StudentLoans => "student-loans",
            Journey::AdditionalPayments => "additional-payments",
        }
    }

    /// Returns true if the journey tracks more than one policy at once
    pub fn is_combined(&self) -> bool {
        self.policies().len() > 1
    }

    /// Returns the journey a policy is claimed through
    pub fn for_policy(policy: Policy) -> Self {
        if policy.is_combinable() {
            Journey::AdditionalPayments
        } else {
            Journey::StudentLoans
        }
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.routing_name())
    }
}

impl FromStr for Journey {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student-loans" => Ok(Journey::StudentLoans),
            "additional-payments" => Ok(Journey::AdditionalPayments),
            other => Err(EligibilityError::UnknownJourney(other.to_string())),
        }
    }
}
