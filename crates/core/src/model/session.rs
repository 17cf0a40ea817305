use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::ProgressSnapshot;

/// One application launch, with overall progress at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub timestamp: DateTime<Utc>,
    pub progress: ProgressSnapshot,
}

impl StudySession {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, progress: ProgressSnapshot) -> Self {
        Self {
            timestamp,
            progress,
        }
    }
}
