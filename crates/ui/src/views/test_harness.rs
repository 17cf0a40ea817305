use std::path::PathBuf;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Clock, ProgressTracker, StudySessionService, ThemeService};
use async_trait::async_trait;
use storage::repository::{KeyValueStore, Storage, StorageError};
use tracker_core::syllabus::Syllabus;
use tracker_core::time::fixed_now;

use crate::context::{UiApp, UiState, build_app_context};
use crate::views::{ChecklistView, HistoryView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    export_dir: PathBuf,
    notes_dir: PathBuf,
}

impl UiApp for TestApp {
    fn syllabus(&self) -> Arc<Syllabus> {
        self.services.syllabus()
    }

    fn tracker(&self) -> Arc<ProgressTracker> {
        self.services.tracker()
    }

    fn themes(&self) -> Arc<ThemeService> {
        self.services.themes()
    }

    fn study_sessions(&self) -> Arc<StudySessionService> {
        self.services.study_sessions()
    }

    fn export_dir(&self) -> PathBuf {
        self.export_dir.clone()
    }

    fn notes_dir(&self) -> PathBuf {
        self.notes_dir.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Checklist,
    History,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(UiState::new);
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Checklist => rsx! { ChecklistView {} },
        ViewKind::History => rsx! { HistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over in-memory storage with the built-in syllabus.
pub async fn test_services() -> AppServices {
    AppServices::from_storage(
        &Storage::in_memory(),
        Clock::fixed(fixed_now()),
        Syllabus::builtin().expect("builtin syllabus"),
    )
    .await
}

/// Backend that rejects every call.
struct OfflineStore;

#[async_trait]
impl KeyValueStore for OfflineStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".to_string()))
    }
}

/// Services whose storage is unreachable from the start.
pub async fn offline_services() -> AppServices {
    let storage = Storage {
        kv: Arc::new(OfflineStore),
    };
    AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        Syllabus::builtin().expect("builtin syllabus"),
    )
    .await
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_services(view, test_services().await)
}

/// Build the harness over prepared services; anything written to them
/// beforehand is visible on first render.
pub fn setup_view_harness_with_services(view: ViewKind, services: AppServices) -> ViewHarness {
    setup_view_harness_with_notes(view, services, std::env::temp_dir().join("no-notes"))
}

pub fn setup_view_harness_with_notes(
    view: ViewKind,
    services: AppServices,
    notes_dir: PathBuf,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
        export_dir: std::env::temp_dir(),
        notes_dir,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, services }
}
