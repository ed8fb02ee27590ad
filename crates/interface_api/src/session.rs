//! Journey sessions
//!
//! A claimant's in-progress claim lives in memory between requests, keyed by
//! a journey ID handed out when the journey starts. A session unused for
//! longer than the configured timeout is discarded on its next access, and
//! by [`SessionStore::purge_expired`] run periodically by the server.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use core_kernel::JourneyId;
use domain_claims::ClaimAggregate;

use crate::error::ApiError;

#[derive(Debug, Clone)]
struct JourneySession {
    claim: ClaimAggregate,
    last_seen: DateTime<Utc>,
}

/// In-progress claims shared across request handlers
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<JourneyId, JourneySession>>>,
    timeout: Duration,
}

impl SessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            timeout,
        }
    }

    /// Opens a session for a newly started claim
    pub async fn open(&self, claim: ClaimAggregate, now: DateTime<Utc>) -> JourneyId {
        let id = JourneyId::new();
        self.sessions
            .write()
            .await
            .insert(id, JourneySession { claim, last_seen: now });
        debug!(journey_id = %id, "Opened journey session");
        id
    }

    /// Runs `work` against the session's claim and marks the session as used
    ///
    /// The claim is replaced only when `work` succeeds, so a failed request
    /// leaves the claim as it was.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown session and `SessionExpired` for one left
    /// idle beyond the timeout, which is discarded. Otherwise whatever
    /// `work` returns.
    pub async fn update<T, F>(&self, id: JourneyId, now: DateTime<Utc>, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut ClaimAggregate) -> Result<T, ApiError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Journey {}", id)))?;

        if now - session.last_seen > self.timeout {
            sessions.remove(&id);
            info!(journey_id = %id, "Journey session expired");
            return Err(ApiError::SessionExpired);
        }

        let mut staged = session.claim.clone();
        let output = work(&mut staged)?;
        session.claim = staged;
        session.last_seen = now;
        Ok(output)
    }

    /// Ends a session, returning its claim
    pub async fn close(&self, id: JourneyId) -> Option<ClaimAggregate> {
        self.sessions.write().await.remove(&id).map(|session| session.claim)
    }

    /// Discards every session idle beyond the timeout, returning how many went
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= self.timeout);
        let purged = before - sessions.len();
        if purged > 0 {
            info!(purged, "Purged expired journey sessions");
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
