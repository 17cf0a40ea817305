mod checklist_vm;
mod history_vm;
mod time_fmt;

pub use checklist_vm::{ChecklistVm, OverallVm, TopicVm, UnitVm, map_checklist};
pub use history_vm::{StudySessionRowVm, map_study_sessions};
pub use time_fmt::format_datetime;
