//! Journey Domain
//!
//! This crate works out which pages a claimant sees, in what order, and
//! whether each page has been answered. Nothing here is stored: the page
//! sequence is recomputed from the claim's answers whenever it is needed.
//!
//! # Navigation
//!
//! ```text
//! template (every page) --filter by answers and status--> sequence
//! sequence + current page --> next page / back link
//! ```

pub mod slug;
pub mod template;
pub mod sequencer;
pub mod page_sequence;
pub mod validation;
pub mod error;

pub use slug::Slug;
pub use template::template;
pub use sequencer::{journey_of, slug_sequence};
pub use page_sequence::PageSequence;
pub use validation::{ready_to_submit, requirements, validate_journey, validate_step, Answer, Requirement};
pub use error::{FieldError, JourneyError};
