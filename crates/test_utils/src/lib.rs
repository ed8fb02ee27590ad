//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built schools, answers and configuration
//! - `builders`: Builder for claims part way through a journey
//! - `stores`: Claim stores with injectable faults
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod stores;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use stores::*;
pub use assertions::*;
pub use generators::*;
