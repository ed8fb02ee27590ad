//! Navigation from one page to the next

use domain_claims::ClaimAggregate;
use domain_eligibility::EligibilityStatus;

use crate::error::JourneyError;
use crate::sequencer::slug_sequence;
use crate::slug::Slug;
use crate::validation::ready_to_submit;

/// The claim's page sequence seen from the page the claimant is on
#[derive(Debug, Clone)]
pub struct PageSequence<'a> {
    claim: &'a ClaimAggregate,
    slugs: Vec<Slug>,
    current: Slug,
}

impl<'a> PageSequence<'a> {
    /// Computes the sequence for the claim's current answers
    ///
    /// # Errors
    ///
    /// `Claim` when the aggregate has no main record.
    pub fn new(claim: &'a ClaimAggregate, current: Slug) -> Result<Self, JourneyError> {
        Ok(Self {
            claim,
            slugs: slug_sequence(claim)?,
            current,
        })
    }

    pub fn slugs(&self) -> &[Slug] {
        &self.slugs
    }

    pub fn current(&self) -> Slug {
        self.current
    }

    pub fn in_sequence(&self, slug: Slug) -> bool {
        self.slugs.contains(&slug)
    }

    /// Fails unless the current page belongs to the sequence
    pub fn ensure_current_in_sequence(&self) -> Result<(), JourneyError> {
        if self.in_sequence(self.current) {
            Ok(())
        } else {
            Err(JourneyError::NotInSequence { slug: self.current })
        }
    }

    fn position(&self, slug: Slug) -> Option<usize> {
        self.slugs.iter().position(|candidate| *candidate == slug)
    }

    /// Page to show once the current page is answered
    ///
    /// An ineligible claim goes straight to the ineligible page. A claim
    /// with every page answered returns to check-your-answers, so changing
    /// one answer does not walk the claimant through the whole journey
    /// again.
    pub fn next_slug(&self) -> Option<Slug> {
        if self.claim.eligibility_status() == EligibilityStatus::Ineligible
            && self.current != Slug::Ineligible
            && self.in_sequence(Slug::Ineligible)
        {
            return Some(Slug::Ineligible);
        }

        if self.current != Slug::CheckYourAnswers
            && self.in_sequence(Slug::CheckYourAnswers)
            && ready_to_submit(self.claim)
        {
            return Some(Slug::CheckYourAnswers);
        }

        match self.position(self.current) {
            Some(index) => self.slugs.get(index + 1).copied(),
            None => self.slugs.first().copied(),
        }
    }

    /// Page the back link points at
    ///
    /// None on the first page, on pages outside the sequence and on dead ends.
    pub fn previous_slug(&self) -> Option<Slug> {
        if self.current.is_dead_end() {
            return None;
        }

        self.position(self.current)
            .filter(|index| *index > 0)
            .and_then(|index| self.slugs.get(index - 1).copied())
    }
}
