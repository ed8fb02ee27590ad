//! Early-career payment award table
//!
//! Static reference data mapping a training cohort and a claim year to the
//! base and uplift award amounts. The table is authored in ascending claim
//! year order, so "first match" means "earliest claim year".

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::AcademicYear;

use crate::subject::{IttAcademicYear, IttSubject};

/// Training cohorts that can never claim an early-career payment
///
/// Claimants who trained outside the offered years, and the 2017/2018
/// cohort, predate the scheme regardless of subject.
pub const EXCLUDED_ITT_COHORTS: [IttAcademicYear; 2] = [
    IttAcademicYear::NoneOfTheAbove,
    IttAcademicYear::Year(AcademicYear::new(2017)),
];

/// Composite key identifying one row of the award table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CohortKey {
    /// Subject of initial teacher training
    pub subject: IttSubject,
    /// Academic year initial teacher training was completed
    pub itt_year: AcademicYear,
    /// Academic year the claim is made in
    pub claim_year: AcademicYear,
}

impl CohortKey {
    pub const fn new(subject: IttSubject, itt_year: AcademicYear, claim_year: AcademicYear) -> Self {
        Self {
            subject,
            itt_year,
            claim_year,
        }
    }
}

/// One row of the award table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardEntry {
    pub key: CohortKey,
    /// Award at schools without the uplift
    pub base_amount: Decimal,
    /// Award at uplift schools
    pub uplift_amount: Decimal,
}

impl AwardEntry {
    /// Returns the amount for a school with or without the uplift
    pub fn amount(&self, uplift: bool) -> Decimal {
        if uplift {
            self.uplift_amount
        } else {
            self.base_amount
        }
    }
}

/// Immutable, ordered award table
#[derive(Debug, Clone)]
pub struct AwardTable {
    entries: Vec<AwardEntry>,
}

static EARLY_CAREER_PAYMENTS: Lazy<AwardTable> = Lazy::new(|| {
    use IttSubject::*;

    let rows: [(IttSubject, u16, u16, Decimal, Decimal); 16] = [
        (Mathematics, 2018, 2021, dec!(5000), dec!(7500)),
        (Mathematics, 2019, 2022, dec!(5000), dec!(7500)),
        (Mathematics, 2020, 2022, dec!(2000), dec!(3000)),
        (Physics, 2020, 2022, dec!(2000), dec!(3000)),
        (Chemistry, 2020, 2022, dec!(2000), dec!(3000)),
        (ForeignLanguages, 2020, 2022, dec!(2000), dec!(3000)),
        (Mathematics, 2018, 2023, dec!(5000), dec!(7500)),
        (Mathematics, 2020, 2023, dec!(2000), dec!(3000)),
        (Physics, 2020, 2023, dec!(2000), dec!(3000)),
        (Chemistry, 2020, 2023, dec!(2000), dec!(3000)),
        (ForeignLanguages, 2020, 2023, dec!(2000), dec!(3000)),
        (Mathematics, 2019, 2024, dec!(5000), dec!(7500)),
        (Mathematics, 2020, 2024, dec!(2000), dec!(3000)),
        (Physics, 2020, 2024, dec!(2000), dec!(3000)),
        (Chemistry, 2020, 2024, dec!(2000), dec!(3000)),
        (ForeignLanguages, 2020, 2024, dec!(2000), dec!(3000)),
    ];

    AwardTable::new(
        rows.into_iter()
            .map(|(subject, itt_year, claim_year, base_amount, uplift_amount)| AwardEntry {
                key: CohortKey::new(
                    subject,
                    AcademicYear::new(itt_year),
                    AcademicYear::new(claim_year),
                ),
                base_amount,
                uplift_amount,
            })
            .collect(),
    )
});

impl AwardTable {
    /// Creates a table from entries in authored order
    pub fn new(entries: Vec<AwardEntry>) -> Self {
        Self { entries }
    }

    /// The early-career payments award table
    pub fn early_career_payments() -> &'static AwardTable {
        &EARLY_CAREER_PAYMENTS
    }

    /// Returns all entries in authored order
    pub fn entries(&self) -> &[AwardEntry] {
        &self.entries
    }

    /// Entries matching subject, training year and claim year
    pub fn exact(&self, key: CohortKey) -> Vec<&AwardEntry> {
        self.entries.iter().filter(|entry| entry.key == key).collect()
    }

    /// Entries matching subject and training year, for every claim year
    pub fn partial_current(&self, subject: IttSubject, itt_year: AcademicYear) -> Vec<&AwardEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.key.subject == subject && entry.key.itt_year == itt_year)
            .collect()
    }

    /// First entry in table order for a subject in the given claim year
    pub fn partial_first(&self, subject: IttSubject, claim_year: AcademicYear) -> Option<&AwardEntry> {
        self.entries
            .iter()
            .find(|entry| entry.key.subject == subject && entry.key.claim_year == claim_year)
    }

    /// Largest uplift amount in the table
    ///
    /// Computed on demand from immutable data; callers that need it as a
    /// bound compute it once and pass it along as configuration.
    pub fn max_uplift_amount(&self) -> Decimal {
        self.entries
            .iter()
            .map(|entry| entry.uplift_amount)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Earliest and latest claim years covered by the table
    pub fn claim_year_range(&self) -> Option<(AcademicYear, AcademicYear)> {
        let first = self.entries.iter().map(|entry| entry.key.claim_year).min()?;
        let last = self.entries.iter().map(|entry| entry.key.claim_year).max()?;
        Some((first, last))
    }
}
