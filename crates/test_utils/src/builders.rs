//! Test Data Builders
//!
//! Provides a builder for claims part way through a journey. Tests name
//! only the answers they care about and let the fixtures fill in the rest.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use domain_claims::adapters::StaticPolicyConfiguration;
use domain_claims::{ClaimAggregate, ClaimLike, ClaimRecord, ClaimStore};
use domain_eligibility::{Journey, School};

use crate::fixtures::{AnswerFixtures, ConfigFixtures, SchoolFixtures, TemporalFixtures};

/// Builder for constructing claims with answers already given
pub struct ClaimBuilder {
    journey: Journey,
    config: StaticPolicyConfiguration,
    now: DateTime<Utc>,
    answers: Map<String, Value>,
}

impl ClaimBuilder {
    /// Creates a builder for a journey with no answers
    pub fn new(journey: Journey) -> Self {
        Self {
            journey,
            config: ConfigFixtures::policy_configuration(),
            now: TemporalFixtures::now(),
            answers: Map::new(),
        }
    }

    /// Combined journey with every eligibility answer of an eligible
    /// mathematics teacher at `school`
    pub fn eligible_combined(school: &School) -> Self {
        Self::new(Journey::AdditionalPayments)
            .with_answers(AnswerFixtures::combined_eligibility(school, "2019/2020"))
    }

    /// Student loans journey with every eligibility answer given
    pub fn eligible_student_loans() -> Self {
        Self::new(Journey::StudentLoans).with_answers(AnswerFixtures::student_loans_eligibility())
    }

    /// Combined journey at a school eligible for both policies
    pub fn default_combined() -> Self {
        Self::eligible_combined(&SchoolFixtures::combined())
    }

    /// Merges answers, later values replacing earlier ones
    pub fn with_answers(mut self, answers: Map<String, Value>) -> Self {
        self.answers.extend(answers);
        self
    }

    /// Sets a single answer
    pub fn with_answer(mut self, key: &str, value: Value) -> Self {
        self.answers.insert(key.to_string(), value);
        self
    }

    /// Removes an answer set by an earlier call
    pub fn without_answer(mut self, key: &str) -> Self {
        self.answers.remove(key);
        self
    }

    /// Adds the personal, contact and payment answers
    pub fn with_personal_details(self) -> Self {
        self.with_answers(AnswerFixtures::personal_details())
    }

    /// Builds the claim with every answer assigned to every member
    ///
    /// # Panics
    ///
    /// Panics if the journey cannot start or an answer is rejected.
    pub fn build(self) -> ClaimAggregate {
        let mut claim = ClaimAggregate::start(self.journey, &self.config, self.now).unwrap();
        claim.assign_attributes(&self.answers).unwrap();
        claim
    }

    /// Builds the claim and submits its main policy
    pub fn submit(self, store: &dyn ClaimStore) -> ClaimRecord {
        let now = self.now;
        let mut claim = self.build();
        claim.submit(None, store, now).unwrap().clone()
    }
}
