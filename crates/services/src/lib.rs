#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod persistence;
pub mod progress_store;
pub mod study_sessions;
pub mod theme_service;
pub mod tracker;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ExportError, ImportError, TrackerError};
pub use persistence::{Persistence, Stored};
pub use progress_store::{EXPORT_FILE_NAME, PROGRESS_KEY, ProgressStore};
pub use study_sessions::{STUDY_SESSIONS_KEY, StudySessionService};
pub use theme_service::{THEME_KEY, ThemeService};
pub use tracker::ProgressTracker;
