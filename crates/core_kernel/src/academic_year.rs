//! Academic year handling
//!
//! Every payment policy is configured per academic year, and eligibility
//! rules are expressed in terms of the year a teacher finished initial
//! teacher training and the year a claim is made. An academic year runs
//! from 1 September to 31 August, with the boundary taken in the
//! Europe/London timezone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Europe::London;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Month in which a new academic year starts
const ACADEMIC_YEAR_START_MONTH: u32 = 9;

/// Start years accepted when parsing
const PARSEABLE_START_YEARS: std::ops::RangeInclusive<u16> = 1900..=9998;

/// Errors related to academic year parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AcademicYearError {
    #[error("Invalid academic year format: {0}")]
    InvalidFormat(String),

    #[error("Academic year {start}/{end} does not span consecutive years")]
    NonConsecutive { start: u16, end: u16 },
}

/// An academic year, identified by the calendar year it starts in
///
/// Displayed and serialized as `"2021/2022"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcademicYear {
    start_year: u16,
}

impl AcademicYear {
    /// Creates the academic year starting in `start_year`
    pub const fn new(start_year: u16) -> Self {
        Self { start_year }
    }

    /// Returns the calendar year in which the academic year starts
    pub const fn start_year(&self) -> u16 {
        self.start_year
    }

    /// Returns the calendar year in which the academic year ends
    pub const fn end_year(&self) -> u16 {
        self.start_year.saturating_add(1)
    }

    /// Returns the following academic year
    pub const fn next(&self) -> Self {
        Self::new(self.start_year.saturating_add(1))
    }

    /// Returns the preceding academic year
    pub const fn previous(&self) -> Self {
        Self::new(self.start_year.saturating_sub(1))
    }

    /// Returns the academic year `years` before this one
    pub const fn years_before(&self, years: u16) -> Self {
        Self::new(self.start_year.saturating_sub(years))
    }

    /// Returns the academic year containing the given date
    pub fn for_date(date: NaiveDate) -> Self {
        let year = u16::try_from(date.year().max(0)).unwrap_or(u16::MAX);
        if date.month() >= ACADEMIC_YEAR_START_MONTH {
            Self::new(year)
        } else {
            Self::new(year.saturating_sub(1))
        }
    }

    /// Returns the academic year at the given instant, evaluated in UK local time
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::for_date(instant.with_timezone(&London).date_naive())
    }

    /// Returns the first day of the academic year
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year as i32, ACADEMIC_YEAR_START_MONTH, 1)
    }

    /// Returns true if the date falls within this academic year
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::for_date(date) == *self
    }

    /// Returns the inclusive range of academic years from `self` to `last`
    pub fn through(self, last: AcademicYear) -> impl Iterator<Item = AcademicYear> {
        (self.start_year..=last.start_year).map(AcademicYear::new)
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start_year, self.end_year())
    }
}

impl FromStr for AcademicYear {
    type Err = AcademicYearError;

    /// Accepts `2021/2022`, `2021_2022` and `2021-2022` for start years
    /// 1900 to 9998
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(['/', '_', '-']);
        let (start, end) = match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), None) => (start, end),
            _ => return Err(AcademicYearError::InvalidFormat(s.to_string())),
        };

        let start: u16 = start
            .parse()
            .map_err(|_| AcademicYearError::InvalidFormat(s.to_string()))?;
        let end: u16 = end
            .parse()
            .map_err(|_| AcademicYearError::InvalidFormat(s.to_string()))?;

        if !PARSEABLE_START_YEARS.contains(&start) {
            return Err(AcademicYearError::InvalidFormat(s.to_string()));
        }
        if start.checked_add(1) != Some(end) {
            return Err(AcademicYearError::NonConsecutive { start, end });
        }

        Ok(Self::new(start))
    }
}

impl Serialize for AcademicYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AcademicYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AcademicYear::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_and_parse() {
        let year = AcademicYear::new(2021);
        assert_eq!(year.to_string(), "2021/2022");
        assert_eq!("2021/2022".parse::<AcademicYear>().unwrap(), year);
        assert_eq!("2021_2022".parse::<AcademicYear>().unwrap(), year);
    }

    #[test]
    fn test_boundary_is_first_of_september() {
        let august = NaiveDate::from_ymd_opt(2022, 8, 31).unwrap();
        let september = NaiveDate::from_ymd_opt(2022, 9, 1).unwrap();
        assert_eq!(AcademicYear::for_date(august), AcademicYear::new(2021));
        assert_eq!(AcademicYear::for_date(september), AcademicYear::new(2022));
    }

    #[test]
    fn test_boundary_uses_uk_local_time() {
        // 23:30 UTC on 31 August is already 1 September in London (BST)
        let instant = Utc.with_ymd_and_hms(2022, 8, 31, 23, 30, 0).unwrap();
        assert_eq!(AcademicYear::at(instant), AcademicYear::new(2022));
    }
}
