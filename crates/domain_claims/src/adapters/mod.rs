//! Adapters for the claims domain ports
//!
//! The engine ships with in-memory adapters only. They back the tests and
//! the demonstration HTTP service; a deployment would replace them with
//! adapters over its own database, reference data and email delivery.
//!
//! # Available Adapters
//!
//! - **InMemoryClaimStore**: transactional claim store over a `BTreeMap`
//! - **StaticPolicyConfiguration**: fixed academic years and maximum awards
//! - **InMemorySchoolDirectory**: a fixed list of schools
//! - **TracingNotificationSender**: logs notifications instead of sending them
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::adapters::{InMemoryClaimStore, StaticPolicyConfiguration};
//! use domain_claims::ClaimStore;
//! use std::sync::Arc;
//!
//! let config = StaticPolicyConfiguration::new(AcademicYear::new(2022));
//! let store: Arc<dyn ClaimStore> = Arc::new(InMemoryClaimStore::new());
//! ```

pub mod in_memory;

pub use in_memory::{
    InMemoryClaimStore, InMemorySchoolDirectory, StaticPolicyConfiguration, TracingNotificationSender,
};
