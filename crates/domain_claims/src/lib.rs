//! Claims Domain
//!
//! This crate holds claims from the moment a claimant starts a journey
//! through submission and the administrative decisions that follow.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Started (one record per policy) -> Submitted (one record) -> Approved/Rejected -> Paid
//!                                                  |                 |
//!                                                  +---- on hold ----+
//! ```
//!
//! Answers change freely until submission. After that only decisions,
//! holds, award amendments, top-ups and the payroll marker change.

pub mod answers;
pub mod claim;
pub mod claim_like;
pub mod aggregate;
pub mod decision;
pub mod topup;
pub mod reminder;
pub mod notification;
pub mod ports;
pub mod adapters;
pub mod error;

pub use answers::{
    ClaimantAnswers, PaymentMethod, PayrollGender, StudentLoanCountry, StudentLoanCourses, StudentLoanStartDate,
};
pub use claim::{ClaimRecord, PolicyOption};
pub use claim_like::ClaimLike;
pub use aggregate::{ClaimAggregate, DEFAULT_COMBINED_POLICY};
pub use decision::{Decision, DecisionResult, RejectedReason};
pub use topup::{pounds, Topup};
pub use reminder::Reminder;
pub use notification::{MessageType, Notification};
pub use ports::{ClaimStore, ClaimTransaction, NotificationSender, PolicyConfigurationProvider, SchoolDirectory};
pub use error::{ClaimError, DecisionError, ErrorKind};
