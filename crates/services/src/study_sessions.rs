use std::sync::Arc;

use storage::repository::KeyValueStore;
use tracing::warn;
use tracker_core::Clock;
use tracker_core::model::StudySession;
use tracker_core::progress::ProgressSnapshot;

use crate::persistence::{Persistence, Stored};

/// Key under which the JSON list of study sessions is kept.
pub const STUDY_SESSIONS_KEY: &str = "studySessions";

/// Append-only log of application launches and the progress at each.
#[derive(Clone)]
pub struct StudySessionService {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
}

impl StudySessionService {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, kv }
    }

    /// Recorded sessions, oldest first. Unreadable data reads as no sessions.
    pub async fn list_sessions(&self) -> Vec<StudySession> {
        match self.kv.get(STUDY_SESSIONS_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "discarding malformed study session log");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "study session storage unavailable");
                Vec::new()
            }
        }
    }

    /// Append a session stamped with the clock's current time.
    pub async fn record_session(&self, progress: ProgressSnapshot) -> Stored<StudySession> {
        let session = StudySession::new(self.clock.now(), progress);
        let mut sessions = self.list_sessions().await;
        sessions.push(session.clone());

        let persistence = match serde_json::to_string(&sessions) {
            Ok(encoded) => match self.kv.set(STUDY_SESSIONS_KEY, &encoded).await {
                Ok(()) => Persistence::Persisted,
                Err(err) => {
                    warn!(error = %err, "study session not persisted");
                    Persistence::InMemoryOnly
                }
            },
            Err(err) => {
                warn!(error = %err, "could not encode study sessions");
                Persistence::InMemoryOnly
            }
        };

        Stored::new(session, persistence)
    }
}
