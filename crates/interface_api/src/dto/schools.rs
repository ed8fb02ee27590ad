//! School search DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::SchoolId;
use domain_eligibility::School;

#[derive(Debug, Deserialize, Validate)]
pub struct SchoolSearchQuery {
    #[validate(length(min = 3, message = "Search for the school name with a minimum of 3 characters"))]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SchoolResponse {
    pub id: SchoolId,
    pub name: String,
    pub urn: u32,
}

impl From<School> for SchoolResponse {
    fn from(school: School) -> Self {
        Self {
            id: school.id,
            name: school.name,
            urn: school.urn,
        }
    }
}
