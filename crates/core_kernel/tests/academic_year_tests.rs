//! Tests for AcademicYear

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{AcademicYear, AcademicYearError};
use proptest::prelude::*;

mod parsing_tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_separators() {
        for input in ["2022/2023", "2022_2023", "2022-2023", " 2022/2023 "] {
            assert_eq!(input.parse::<AcademicYear>().unwrap(), AcademicYear::new(2022));
        }
    }

    #[test]
    fn test_parse_rejects_single_year() {
        assert!(matches!(
            "2022".parse::<AcademicYear>(),
            Err(AcademicYearError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(
            "twenty/2023".parse::<AcademicYear>(),
            Err(AcademicYearError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_years_outside_range() {
        for input in ["65535/0", "65535/65536", "9999/10000", "0/1", "1899/1900"] {
            assert!(
                matches!(input.parse::<AcademicYear>(), Err(AcademicYearError::InvalidFormat(_))),
                "{} should be rejected",
                input
            );
        }
        assert_eq!("9998/9999".parse::<AcademicYear>().unwrap(), AcademicYear::new(9998));
    }

    #[test]
    fn test_parse_rejects_gap() {
        assert_eq!(
            "2020/2022".parse::<AcademicYear>(),
            Err(AcademicYearError::NonConsecutive { start: 2020, end: 2022 })
        );
    }
}

mod calendar_tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let year = AcademicYear::new(2021);
        assert_eq!(year.next(), AcademicYear::new(2022));
        assert_eq!(year.previous(), AcademicYear::new(2020));
        assert_eq!(year.years_before(5), AcademicYear::new(2016));
        assert_eq!(year.end_year(), 2022);
    }

    #[test]
    fn test_navigation_saturates_at_bounds() {
        assert_eq!(AcademicYear::new(u16::MAX).next(), AcademicYear::new(u16::MAX));
        assert_eq!(AcademicYear::new(u16::MAX).end_year(), u16::MAX);
        assert_eq!(AcademicYear::new(0).previous(), AcademicYear::new(0));
        assert_eq!(AcademicYear::new(3).years_before(5), AcademicYear::new(0));
    }

    #[test]
    fn test_through_is_inclusive() {
        let years: Vec<_> = AcademicYear::new(2018)
            .through(AcademicYear::new(2020))
            .collect();
        assert_eq!(
            years,
            vec![AcademicYear::new(2018), AcademicYear::new(2019), AcademicYear::new(2020)]
        );
    }

    #[test]
    fn test_contains() {
        let year = AcademicYear::new(2021);
        assert!(year.contains(NaiveDate::from_ymd_opt(2021, 9, 1).unwrap()));
        assert!(year.contains(NaiveDate::from_ymd_opt(2022, 8, 31).unwrap()));
        assert!(!year.contains(NaiveDate::from_ymd_opt(2022, 9, 1).unwrap()));
    }

    #[test]
    fn test_start_date() {
        assert_eq!(
            AcademicYear::new(2023).start_date(),
            NaiveDate::from_ymd_opt(2023, 9, 1)
        );
    }

    #[test]
    fn test_winter_instant_uses_gmt() {
        let instant = Utc.with_ymd_and_hms(2023, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(AcademicYear::at(instant), AcademicYear::new(2022));
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_slash_string() {
        let json = serde_json::to_string(&AcademicYear::new(2020)).unwrap();
        assert_eq!(json, "\"2020/2021\"");
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<AcademicYear, _> = serde_json::from_str("\"2020/2020\"");
        assert!(result.is_err());
    }
}

proptest! {
    #[test]
    fn prop_display_parses_back(start in 1990u16..2100) {
        let year = AcademicYear::new(start);
        prop_assert_eq!(year.to_string().parse::<AcademicYear>().unwrap(), year);
    }

    #[test]
    fn prop_every_date_belongs_to_exactly_one_year(days in 0i64..20_000) {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(days);
        let year = AcademicYear::for_date(date);
        prop_assert!(year.contains(date));
        prop_assert!(!year.next().contains(date));
        prop_assert!(!year.previous().contains(date));
    }
}
