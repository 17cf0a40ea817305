use std::sync::Arc;

use storage::repository::Storage;
use tracker_core::syllabus::Syllabus;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::study_sessions::StudySessionService;
use crate::theme_service::ThemeService;
use crate::tracker::ProgressTracker;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    syllabus: Arc<Syllabus>,
    tracker: Arc<ProgressTracker>,
    themes: Arc<ThemeService>,
    study_sessions: Arc<StudySessionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        syllabus: Syllabus,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, syllabus).await)
    }

    /// Build services over an existing storage bundle.
    pub async fn from_storage(storage: &Storage, clock: Clock, syllabus: Syllabus) -> Self {
        let syllabus = Arc::new(syllabus);
        let store = Arc::new(ProgressStore::new(Arc::clone(&storage.kv)));
        let tracker = Arc::new(ProgressTracker::open(Arc::clone(&syllabus), store).await);
        let themes = Arc::new(ThemeService::new(Arc::clone(&storage.kv)));
        let study_sessions = Arc::new(StudySessionService::new(clock, Arc::clone(&storage.kv)));

        Self {
            syllabus,
            tracker,
            themes,
            study_sessions,
        }
    }

    #[must_use]
    pub fn syllabus(&self) -> Arc<Syllabus> {
        Arc::clone(&self.syllabus)
    }

    #[must_use]
    pub fn tracker(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.tracker)
    }

    #[must_use]
    pub fn themes(&self) -> Arc<ThemeService> {
        Arc::clone(&self.themes)
    }

    #[must_use]
    pub fn study_sessions(&self) -> Arc<StudySessionService> {
        Arc::clone(&self.study_sessions)
    }
}
