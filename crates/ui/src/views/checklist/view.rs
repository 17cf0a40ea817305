use std::collections::HashSet;

use dioxus::document::eval;
use dioxus::prelude::*;
use services::EXPORT_FILE_NAME;
use tracker_core::model::UnitId;

use crate::context::{AppContext, UiState};
use crate::vm::map_checklist;

use super::components::{NoticeBanner, ProgressHeader, ResetModal, Toolbar, UnitSection};
use super::state::{Notice, ToggleRequest};

#[component]
pub fn ChecklistView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context::<UiState>();
    let syllabus = ctx.syllabus();
    let tracker = ctx.tracker();

    // The page is a projection of this record; handlers replace it after
    // every tracker call.
    let record = use_signal({
        let tracker = tracker.clone();
        move || tracker.record()
    });
    let notice = use_signal({
        let tracker = tracker.clone();
        move || {
            (!tracker.persistence().is_persisted()).then(Notice::not_saved)
        }
    });
    let expanded = use_signal(HashSet::<UnitId>::new);
    let import_path = use_signal(String::new);

    let notes_dir = ctx.notes_dir();
    let vm = map_checklist(&syllabus, &record(), &notes_dir);

    let on_toggle = {
        let tracker = tracker.clone();
        use_callback(move |request: ToggleRequest| {
            let tracker = tracker.clone();
            let mut record = record;
            let mut notice = notice;
            spawn(async move {
                match tracker
                    .toggle_topic(&request.unit_id, &request.topic_id, request.completed)
                    .await
                {
                    Ok(_) => {
                        record.set(tracker.record());
                        if !tracker.persistence().is_persisted() {
                            notice.set(Some(Notice::not_saved()));
                        }
                    }
                    Err(err) => notice.set(Some(Notice::error(err.to_string()))),
                }
            });
        })
    };

    let on_export = {
        let tracker = tracker.clone();
        let export_dir = ctx.export_dir();
        use_callback(move |()| {
            let tracker = tracker.clone();
            let path = export_dir.join(EXPORT_FILE_NAME);
            let mut notice = notice;
            spawn(async move {
                let bytes = match tracker.export() {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        notice.set(Some(Notice::error(format!("Export failed: {err}"))));
                        return;
                    }
                };
                match tokio::fs::write(&path, bytes).await {
                    Ok(()) => notice.set(Some(Notice::success(format!(
                        "Progress exported to {}",
                        path.display()
                    )))),
                    Err(err) => {
                        tracing::warn!(error = %err, path = %path.display(), "export write failed");
                        notice.set(Some(Notice::error(format!("Export failed: {err}"))));
                    }
                }
            });
        })
    };

    let on_import = {
        let tracker = tracker.clone();
        use_callback(move |()| {
            let tracker = tracker.clone();
            let path = import_path().trim().to_string();
            let mut record = record;
            let mut notice = notice;
            let mut import_path = import_path;
            spawn(async move {
                let bytes = match tokio::fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        notice.set(Some(Notice::error(format!("Could not read {path}: {err}"))));
                        return;
                    }
                };
                match tracker.import(&bytes).await {
                    Ok(_) => {
                        record.set(tracker.record());
                        import_path.set(String::new());
                        notice.set(Some(Notice::after_write(
                            tracker.persistence(),
                            "Progress imported successfully!",
                        )));
                    }
                    Err(_) => notice.set(Some(Notice::error(
                        "Error importing progress. Invalid file format.",
                    ))),
                }
            });
        })
    };

    let on_confirm_reset = {
        let tracker = tracker.clone();
        use_callback(move |()| {
            let tracker = tracker.clone();
            let mut record = record;
            let mut notice = notice;
            let mut confirm_reset = ui.confirm_reset;
            confirm_reset.set(false);
            spawn(async move {
                tracker.reset().await;
                record.set(tracker.record());
                notice.set(Some(Notice::after_write(
                    tracker.persistence(),
                    "Progress has been reset!",
                )));
            });
        })
    };

    let on_toggle_theme = {
        let themes = ctx.themes();
        use_callback(move |()| ui.toggle_theme(themes.clone()))
    };

    let on_request_reset = use_callback(move |()| {
        let mut confirm_reset = ui.confirm_reset;
        confirm_reset.set(true);
    });
    let on_cancel_reset = use_callback(move |()| {
        let mut confirm_reset = ui.confirm_reset;
        confirm_reset.set(false);
    });
    let on_print = use_callback(move |()| {
        let _ = eval("window.print();");
    });
    let on_dismiss = use_callback(move |()| {
        let mut notice = notice;
        notice.set(None);
    });

    let theme_icon = (ui.theme)().toggle_icon();
    let expanded_now = expanded();

    rsx! {
        div { class: "page checklist-page",
            h2 { "{vm.title}" }
            Toolbar {
                import_path,
                on_toggle_theme,
                on_export,
                on_import,
                on_request_reset,
                on_print,
                theme_icon,
            }
            if let Some(current) = notice() {
                NoticeBanner { notice: current, on_dismiss }
            }
            ProgressHeader { overall: vm.overall.clone() }
            div { class: "units",
                for unit in vm.units.clone() {
                    UnitSection {
                        key: "{unit.id}",
                        expanded: expanded_now.contains(&unit.id),
                        on_expand: {
                            let unit_id = unit.id.clone();
                            move |()| {
                                let mut expanded = expanded;
                                let mut next = expanded();
                                if !next.remove(&unit_id) {
                                    next.insert(unit_id.clone());
                                }
                                expanded.set(next);
                            }
                        },
                        unit: unit.clone(),
                        on_toggle,
                    }
                }
            }
            if (ui.confirm_reset)() {
                ResetModal { on_confirm: on_confirm_reset, on_cancel: on_cancel_reset }
            }
        }
    }
}
