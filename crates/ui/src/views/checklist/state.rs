use services::Persistence;
use tracker_core::model::{TopicId, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub(super) fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Warning => "notice notice--warning",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

/// One-line feedback shown above the checklist after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub(super) fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub(super) fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub(super) fn not_saved() -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: "Progress could not be saved and will be lost when the app closes."
                .to_string(),
        }
    }

    /// `success` unless the write stayed in memory.
    pub(super) fn after_write(persistence: Persistence, message: impl Into<String>) -> Self {
        if persistence.is_persisted() {
            Self::success(message)
        } else {
            Self::not_saved()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct ToggleRequest {
    pub unit_id: UnitId,
    pub topic_id: TopicId,
    pub completed: bool,
}
