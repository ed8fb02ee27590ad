//! Initial teacher training subjects, routes and cohorts

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use core_kernel::AcademicYear;

use crate::error::EligibilityError;

/// Subject a teacher trained in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IttSubject {
    Chemistry,
    Computing,
    ForeignLanguages,
    Mathematics,
    Physics,
    NoneOfTheAbove,
}

impl IttSubject {
    /// Returns the machine name of the subject
    pub fn as_str(&self) -> &'static str {
        match self {
            IttSubject::Chemistry => "chemistry",
            IttSubject::Computing => "computing",
            IttSubject::ForeignLanguages => "foreign_languages",
            IttSubject::Mathematics => "mathematics",
            IttSubject::Physics => "physics",
            IttSubject::NoneOfTheAbove => "none_of_the_above",
        }
    }

    /// Returns the label shown on the subject question
    pub fn display_name(&self) -> &'static str {
        match self {
            IttSubject::Chemistry => "Chemistry",
            IttSubject::Computing => "Computing",
            IttSubject::ForeignLanguages => "Foreign languages",
            IttSubject::Mathematics => "Mathematics",
            IttSubject::Physics => "Physics",
            IttSubject::NoneOfTheAbove => "None of the above",
        }
    }
}

impl fmt::Display for IttSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route a teacher took into teaching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualification {
    PostgraduateItt,
    UndergraduateItt,
    AssessmentOnly,
    OverseasRecognition,
}

impl Qualification {
    /// Returns the wording used when the route is quoted back to the claimant
    pub fn display_name(&self) -> &'static str {
        match self {
            Qualification::PostgraduateItt => "postgraduate initial teacher training (ITT)",
            Qualification::UndergraduateItt => "undergraduate initial teacher training (ITT)",
            Qualification::AssessmentOnly => "assessment only",
            Qualification::OverseasRecognition => "overseas recognition qualification",
        }
    }
}

/// Academic year in which initial teacher training was completed
///
/// Claimants who trained outside the offered years answer "none of the
/// above". Serialized as `"2018/2019"` or `"none_of_the_above"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IttAcademicYear {
    Year(AcademicYear),
    NoneOfTheAbove,
}

impl IttAcademicYear {
    const NONE_OF_THE_ABOVE: &'static str = "none_of_the_above";

    /// Returns the academic year, if one was given
    pub fn year(&self) -> Option<AcademicYear> {
        match self {
            IttAcademicYear::Year(year) => Some(*year),
            IttAcademicYear::NoneOfTheAbove => None,
        }
    }
}

impl From<AcademicYear> for IttAcademicYear {
    fn from(year: AcademicYear) -> Self {
        IttAcademicYear::Year(year)
    }
}

impl fmt::Display for IttAcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IttAcademicYear::Year(year) => write!(f, "{}", year),
            IttAcademicYear::NoneOfTheAbove => f.write_str(Self::NONE_OF_THE_ABOVE),
        }
    }
}

impl FromStr for IttAcademicYear {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::NONE_OF_THE_ABOVE {
            return Ok(IttAcademicYear::NoneOfTheAbove);
        }
        s.parse::<AcademicYear>()
            .map(IttAcademicYear::Year)
            .map_err(|e| EligibilityError::invalid_answer("itt_academic_year", e.to_string()))
    }
}

impl Serialize for IttAcademicYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IttAcademicYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IttAcademicYear::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itt_academic_year_parsing() {
        assert_eq!(
            "2018/2019".parse::<IttAcademicYear>().unwrap(),
            IttAcademicYear::Year(AcademicYear::new(2018))
        );
        assert_eq!(
            "none_of_the_above".parse::<IttAcademicYear>().unwrap(),
            IttAcademicYear::NoneOfTheAbove
        );
        assert!("2018".parse::<IttAcademicYear>().is_err());
    }

    #[test]
    fn test_subject_serde_names() {
        let json = serde_json::to_string(&IttSubject::ForeignLanguages).unwrap();
        assert_eq!(json, "\"foreign_languages\"");
        assert_eq!(IttSubject::ForeignLanguages.as_str(), "foreign_languages");
    }
}
