use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;
use tracker_core::model::{ProgressRecord, TopicId, TopicKey, UnitId};
use tracker_core::progress::ProgressReport;
use tracker_core::syllabus::Syllabus;

use crate::error::{ExportError, ImportError, TrackerError};
use crate::persistence::Persistence;
use crate::progress_store::ProgressStore;

#[derive(Debug, Default)]
struct TrackerState {
    record: ProgressRecord,
    persistence: Persistence,
}

/// Owns the live record for one syllabus and turns user events into
/// store writes plus a recomputed `ProgressReport`.
///
/// The in-memory record is updated before the write is awaited, so a failed
/// write only downgrades `persistence()`; the state lock is never held across
/// an await. Mutations queue on `writes`, so stores land in the order the
/// records were produced.
pub struct ProgressTracker {
    syllabus: Arc<Syllabus>,
    store: Arc<ProgressStore>,
    state: Mutex<TrackerState>,
    writes: AsyncMutex<()>,
}

impl ProgressTracker {
    /// Load persisted progress for `syllabus`.
    pub async fn open(syllabus: Arc<Syllabus>, store: Arc<ProgressStore>) -> Self {
        let loaded = store.load().await;
        Self {
            syllabus,
            store,
            state: Mutex::new(TrackerState {
                record: loaded.value,
                persistence: loaded.persistence,
            }),
            writes: AsyncMutex::new(()),
        }
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, record: ProgressRecord) -> ProgressReport {
        let report = ProgressReport::compute(&self.syllabus, &record);
        self.state().record = record;
        report
    }

    #[must_use]
    pub fn syllabus(&self) -> Arc<Syllabus> {
        Arc::clone(&self.syllabus)
    }

    #[must_use]
    pub fn record(&self) -> ProgressRecord {
        self.state().record.clone()
    }

    /// Outcome of the most recent write.
    #[must_use]
    pub fn persistence(&self) -> Persistence {
        self.state().persistence
    }

    #[must_use]
    pub fn report(&self) -> ProgressReport {
        let state = self.state();
        ProgressReport::compute(&self.syllabus, &state.record)
    }

    #[must_use]
    pub fn is_completed(&self, unit_id: &UnitId, topic_id: &TopicId) -> bool {
        self.state()
            .record
            .is_completed(&TopicKey::new(unit_id, topic_id))
    }

    /// Mark a topic complete or incomplete and persist the record.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownTopic` if the syllabus has no such topic.
    pub async fn toggle_topic(
        &self,
        unit_id: &UnitId,
        topic_id: &TopicId,
        completed: bool,
    ) -> Result<ProgressReport, TrackerError> {
        if !self.syllabus.contains(unit_id, topic_id) {
            return Err(TrackerError::UnknownTopic {
                unit_id: unit_id.clone(),
                topic_id: topic_id.clone(),
            });
        }

        let _write = self.writes.lock().await;
        let next = ProgressStore::set_topic(self.record(), unit_id, topic_id, completed);
        let report = self.replace(next.clone());
        debug!(%unit_id, %topic_id, completed, "topic toggled");

        let persistence = self.store.save(&next).await;
        self.state().persistence = persistence;
        Ok(report)
    }

    /// Replace all progress with an imported file.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MalformedInput` if the bytes are not a progress
    /// export; the current record is kept.
    pub async fn import(&self, bytes: &[u8]) -> Result<ProgressReport, ImportError> {
        let _write = self.writes.lock().await;
        let stored = self.store.import(bytes).await?;
        let report = self.replace(stored.value);
        self.state().persistence = stored.persistence;
        Ok(report)
    }

    /// Clear all progress.
    pub async fn reset(&self) -> ProgressReport {
        let _write = self.writes.lock().await;
        let report = self.replace(ProgressRecord::new());
        let stored = self.store.reset().await;
        self.state().persistence = stored.persistence;
        report
    }

    /// Encode the current record for download.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if encoding fails.
    pub fn export(&self) -> Result<Vec<u8>, ExportError> {
        self.store.export(&self.record())
    }
}
