use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudySessionRowVm, map_study_sessions};

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let study_sessions = ctx.study_sessions();

    let resource = use_resource(move || {
        let study_sessions = study_sessions.clone();
        async move {
            let sessions = study_sessions.list_sessions().await;
            Ok::<_, ViewError>(map_study_sessions(&sessions))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Study sessions" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No study sessions recorded yet." }
                    } else {
                        table { class: "sessions",
                            thead {
                                tr {
                                    th { "Opened" }
                                    th { "Completed" }
                                    th { "Progress" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    SessionRow { row }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn SessionRow(row: StudySessionRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.started_at_str}" }
            td { "{row.completed} / {row.total}" }
            td { "{row.percentage}%" }
        }
    }
}
