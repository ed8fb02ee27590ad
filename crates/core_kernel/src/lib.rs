//! Core Kernel - Foundational types for the teacher payments claim engine
//!
//! This crate provides the building blocks used across all domain crates:
//! - Academic years, the unit in which every payment policy is configured
//! - Strongly-typed identifiers
//! - Port error types shared by every external collaborator

pub mod academic_year;
pub mod identifiers;
pub mod ports;

pub use academic_year::{AcademicYear, AcademicYearError};
pub use identifiers::{
    ClaimId, DecisionId, SchoolId, ReminderId, PaymentId, TopupId, UserId, JourneyId,
};
pub use ports::{DomainPort, PortError};
