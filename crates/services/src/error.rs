//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use tracker_core::model::{RecordCodecError, TopicId, UnitId};

/// Errors emitted when importing a progress file.
///
/// The existing record is never touched when an import fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("invalid progress file: {0}")]
    MalformedInput(#[from] RecordCodecError),
}

/// Errors emitted when encoding a progress export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Encode(#[from] RecordCodecError),
}

/// Errors emitted by `ProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("topic {topic_id} is not part of unit {unit_id}")]
    UnknownTopic { unit_id: UnitId, topic_id: TopicId },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
