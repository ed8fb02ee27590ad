//! Request and response bodies

pub mod claims;
pub mod journeys;
pub mod schools;
