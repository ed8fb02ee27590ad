//! Schools as seen by the eligibility rules
//!
//! A school is reference data resolved through a directory port; the
//! eligibility shapes hold a snapshot of the school the claimant selected so
//! that status can be recomputed without any lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AcademicYear, SchoolId};

/// Levelling up premium award available at a school for one academic year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevellingUpPremiumAward {
    /// Academic year the award applies to
    pub academic_year: AcademicYear,
    /// Award amount in pounds
    pub award_amount: Decimal,
}

/// A school a teacher may be employed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier
    pub id: SchoolId,
    /// School name
    pub name: String,
    /// Unique reference number
    pub urn: u32,
    /// Whether teachers here can claim early-career payments
    pub eligible_for_early_career_payments: bool,
    /// Whether early-career payments here attract the uplift amount
    pub eligible_for_early_career_payments_as_uplift: bool,
    /// Levelling up premium awards by academic year
    #[serde(default)]
    pub levelling_up_premium_awards: Vec<LevellingUpPremiumAward>,
    /// Whether teachers here can claim student loan repayments
    pub eligible_for_student_loans: bool,
    /// Whether the school is state funded
    pub state_funded: bool,
}

impl School {
    /// Creates a state-funded school that is not eligible for any policy
    pub fn new(name: impl Into<String>, urn: u32) -> Self {
        Self {
            id: SchoolId::new_v7(),
            name: name.into(),
            urn,
            eligible_for_early_career_payments: false,
            eligible_for_early_career_payments_as_uplift: false,
            levelling_up_premium_awards: Vec::new(),
            eligible_for_student_loans: false,
            state_funded: true,
        }
    }

    /// Returns the levelling up premium award for the given year, if any
    pub fn levelling_up_premium_award(&self, academic_year: AcademicYear) -> Option<Decimal> {
        self.levelling_up_premium_awards
            .iter()
            .find(|award| award.academic_year == academic_year)
            .map(|award| award.award_amount)
    }

    /// Returns true if the school has a positive levelling up premium award for the year
    pub fn eligible_for_levelling_up_premium(&self, academic_year: AcademicYear) -> bool {
        self.levelling_up_premium_award(academic_year)
            .is_some_and(|amount| amount > Decimal::ZERO)
    }

    /// Returns true if the school has a positive levelling up premium award for any year
    pub fn eligible_for_levelling_up_premium_in_any_year(&self) -> bool {
        self.levelling_up_premium_awards
            .iter()
            .any(|award| award.award_amount > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_levelling_up_premium_award_lookup() {
        let mut school = School::new("Penistone Grammar School", 106_653);
        school.levelling_up_premium_awards.push(LevellingUpPremiumAward {
            academic_year: AcademicYear::new(2022),
            award_amount: dec!(2000),
        });

        assert_eq!(
            school.levelling_up_premium_award(AcademicYear::new(2022)),
            Some(dec!(2000))
        );
        assert!(school.eligible_for_levelling_up_premium(AcademicYear::new(2022)));
        assert!(!school.eligible_for_levelling_up_premium(AcademicYear::new(2023)));
    }

    #[test]
    fn test_zero_award_is_not_eligible() {
        let mut school = School::new("Not found in spreadsheet", 1);
        school.levelling_up_premium_awards.push(LevellingUpPremiumAward {
            academic_year: AcademicYear::new(2022),
            award_amount: Decimal::ZERO,
        });

        assert!(!school.eligible_for_levelling_up_premium(AcademicYear::new(2022)));
        assert!(!school.eligible_for_levelling_up_premium_in_any_year());
    }
}
