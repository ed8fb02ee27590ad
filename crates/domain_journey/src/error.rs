//! Journey domain errors

use serde::Serialize;
use thiserror::Error;

use domain_claims::{ClaimError, ErrorKind};

use crate::slug::Slug;

/// An unanswered question on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Answer key the message belongs to
    pub field: &'static str,
    /// Message shown next to the question
    pub message: &'static str,
}

/// Errors that can occur while moving through a journey
#[derive(Debug, Error)]
pub enum JourneyError {
    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error("Unknown page: {0}")]
    UnknownSlug(String),

    #[error("Page {slug} is not part of this journey")]
    NotInSequence { slug: Slug },

    #[error("Page {slug} has unanswered questions")]
    Validation { slug: Slug, errors: Vec<FieldError> },
}

impl JourneyError {
    /// Classifies the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            JourneyError::Claim(error) => error.kind(),
            JourneyError::UnknownSlug(_)
            | JourneyError::NotInSequence { .. }
            | JourneyError::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Returns the unanswered questions of a failed page, if that is what failed
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            JourneyError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}
