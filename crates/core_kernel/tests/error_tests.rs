//! Tests for core_kernel error types

use core_kernel::{AcademicYear, AcademicYearError, PortError};

#[test]
fn test_port_error_validation_field() {
    let error = PortError::validation_field("URN must be numeric", "urn");

    match error {
        PortError::Validation { message, field } => {
            assert_eq!(message, "URN must be numeric");
            assert_eq!(field.as_deref(), Some("urn"));
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_port_error_internal_is_not_transient() {
    let error = PortError::internal("store poisoned");
    assert!(!error.is_transient());
    assert!(error.to_string().contains("store poisoned"));
}

#[test]
fn test_connection_error_is_transient() {
    let error = PortError::connection("connection reset during save");
    assert!(error.is_transient());
    assert_eq!(error.to_string(), "Connection error: connection reset during save");
}

#[test]
fn test_academic_year_error_display() {
    let error = "2021/2023".parse::<AcademicYear>().unwrap_err();
    assert_eq!(error, AcademicYearError::NonConsecutive { start: 2021, end: 2023 });
    assert_eq!(
        error.to_string(),
        "Academic year 2021/2023 does not span consecutive years"
    );
}
