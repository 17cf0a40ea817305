use dioxus::prelude::*;

use crate::vm::{OverallVm, TopicVm, UnitVm};

use super::state::{Notice, ToggleRequest};

#[component]
pub(super) fn ProgressHeader(overall: OverallVm) -> Element {
    let pct = overall.percentage;
    rsx! {
        section { class: "overall",
            div { class: "overall-bar",
                div {
                    class: "overall-bar-fill",
                    role: "progressbar",
                    style: "width: {pct}%",
                    "aria-valuenow": "{pct}",
                    "aria-valuemin": "0",
                    "aria-valuemax": "100",
                    "{pct}%"
                }
            }
            p { class: "overall-counts",
                span { id: "completedTopics", "{overall.completed}" }
                " of "
                span { id: "totalTopics", "{overall.total}" }
                " topics completed"
            }
            p { class: "overall-message", "{overall.message}" }
        }
    }
}

#[component]
pub(super) fn NoticeBanner(notice: Notice, on_dismiss: Callback<()>) -> Element {
    rsx! {
        div { class: notice.kind.class(), role: "status",
            span { "{notice.message}" }
            button {
                class: "notice-dismiss",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}

#[component]
pub(super) fn UnitSection(
    unit: UnitVm,
    expanded: bool,
    on_expand: Callback<()>,
    on_toggle: Callback<ToggleRequest>,
) -> Element {
    let unit_id = unit.id.clone();
    rsx! {
        section { class: "unit", id: "{unit_id}",
            div {
                class: if expanded { "unit-header unit-header--open" } else { "unit-header" },
                button {
                    class: "unit-toggle",
                    r#type: "button",
                    onclick: move |_| on_expand.call(()),
                    span { class: "unit-caret" }
                    span { class: "unit-title", "{unit.title}" }
                }
                span { class: "unit-progress", id: "{unit_id}-progress-text", "{unit.percentage}%" }
                if let Some(href) = unit.notes_href.clone() {
                    a { class: "unit-notes", href: "{href}", target: "_blank", "Notes (PDF)" }
                }
            }
            if expanded {
                ul { class: "topics",
                    for topic in unit.topics.clone() {
                        TopicRow {
                            key: "{topic.unit_id}-{topic.topic_id}",
                            topic: topic.clone(),
                            on_toggle,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TopicRow(topic: TopicVm, on_toggle: Callback<ToggleRequest>) -> Element {
    let checked = topic.checked;
    let request = ToggleRequest {
        unit_id: topic.unit_id.clone(),
        topic_id: topic.topic_id.clone(),
        completed: !checked,
    };
    let input_id = format!("{}-{}", topic.unit_id, topic.topic_id);
    rsx! {
        li { class: if checked { "topic-item topic-item--done" } else { "topic-item" },
            input {
                id: "{input_id}",
                class: "topic-checkbox",
                r#type: "checkbox",
                checked,
                onchange: move |_| on_toggle.call(request.clone()),
            }
            label { r#for: "{input_id}", "{topic.label}" }
            if let Some(href) = topic.video_href.clone() {
                a { class: "topic-video", href: "{href}", target: "_blank", "Watch" }
            }
        }
    }
}

#[component]
pub(super) fn Toolbar(
    mut import_path: Signal<String>,
    on_toggle_theme: Callback<()>,
    on_export: Callback<()>,
    on_import: Callback<()>,
    on_request_reset: Callback<()>,
    on_print: Callback<()>,
    theme_icon: &'static str,
) -> Element {
    rsx! {
        div { class: "toolbar",
            button {
                class: "toolbar-button toolbar-theme",
                r#type: "button",
                title: "Toggle theme (Ctrl+K)",
                "data-icon": theme_icon,
                onclick: move |_| on_toggle_theme.call(()),
                "Theme"
            }
            button {
                class: "toolbar-button",
                r#type: "button",
                onclick: move |_| on_export.call(()),
                "Export"
            }
            div { class: "toolbar-import",
                input {
                    r#type: "text",
                    placeholder: "Path to a progress .json file",
                    value: "{import_path}",
                    oninput: move |evt| import_path.set(evt.value()),
                }
                button {
                    class: "toolbar-button",
                    r#type: "button",
                    disabled: import_path().trim().is_empty(),
                    onclick: move |_| on_import.call(()),
                    "Import"
                }
            }
            button {
                class: "toolbar-button",
                r#type: "button",
                onclick: move |_| on_print.call(()),
                "Print"
            }
            button {
                class: "toolbar-button toolbar-button--danger",
                r#type: "button",
                title: "Reset progress (Ctrl+Shift+R)",
                onclick: move |_| on_request_reset.call(()),
                "Reset"
            }
        }
    }
}

#[component]
pub(super) fn ResetModal(on_confirm: Callback<()>, on_cancel: Callback<()>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                h3 { "Reset all progress?" }
                p { "Every topic will be marked incomplete. This cannot be undone." }
                div { class: "modal-actions",
                    button {
                        class: "toolbar-button",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "toolbar-button toolbar-button--danger",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Reset"
                    }
                }
            }
        }
    }
}
