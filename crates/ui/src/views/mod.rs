mod checklist;
mod history;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use checklist::ChecklistView;
pub use history::HistoryView;
pub use state::{ViewError, ViewState, view_state_from_resource};
