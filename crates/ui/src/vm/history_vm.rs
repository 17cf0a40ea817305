use tracker_core::model::StudySession;

use super::time_fmt::format_datetime;

/// One row of the study-session history table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudySessionRowVm {
    pub started_at_str: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

/// Newest sessions first.
#[must_use]
pub fn map_study_sessions(sessions: &[StudySession]) -> Vec<StudySessionRowVm> {
    sessions
        .iter()
        .rev()
        .map(|session| StudySessionRowVm {
            started_at_str: format_datetime(session.timestamp),
            completed: session.progress.completed,
            total: session.progress.total,
            percentage: session.progress.percentage,
        })
        .collect()
}
