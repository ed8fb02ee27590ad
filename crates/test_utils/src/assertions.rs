//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::fmt::Debug;

use domain_claims::{ClaimAggregate, ClaimError, ErrorKind};
use domain_eligibility::{EligibilityStatus, Policy};

/// Asserts that `sequence` appears in `template` in the same order
///
/// # Panics
///
/// Panics naming the first element that is missing or out of order
pub fn assert_subsequence<T: PartialEq + Debug>(sequence: &[T], template: &[T]) {
    let mut remaining = template.iter();
    for item in sequence {
        assert!(
            remaining.any(|candidate| candidate == item),
            "{:?} is missing from the template or out of order\nsequence: {:?}\ntemplate: {:?}",
            item,
            sequence,
            template
        );
    }
}

/// Asserts the status of the claim as a whole
pub fn assert_claim_status(claim: &ClaimAggregate, expected: EligibilityStatus) {
    let members: Vec<(Policy, EligibilityStatus)> = claim
        .records()
        .iter()
        .map(|record| (record.policy(), record.status()))
        .collect();

    assert_eq!(
        claim.eligibility_status(),
        expected,
        "Unexpected claim status, members: {:?}",
        members
    );
}

/// Asserts that a result failed with an error of the given kind
pub fn assert_error_kind<T: Debug>(result: Result<T, ClaimError>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected a {:?} error, got Ok({:?})", expected, value),
        Err(error) => assert_eq!(
            error.kind(),
            expected,
            "Expected a {:?} error, got {:?}",
            expected,
            error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_subsequence_accepts_gaps() {
        assert_subsequence(&[1, 3, 5], &[1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_assert_subsequence_rejects_reordering() {
        assert_subsequence(&[3, 1], &[1, 2, 3]);
    }
}
