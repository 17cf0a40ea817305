use std::path::PathBuf;
use std::sync::Arc;

use dioxus::prelude::*;
use services::{ProgressTracker, StudySessionService, ThemeService};
use tracker_core::model::Theme;
use tracker_core::syllabus::Syllabus;

pub trait UiApp: Send + Sync {
    fn syllabus(&self) -> Arc<Syllabus>;
    fn tracker(&self) -> Arc<ProgressTracker>;
    fn themes(&self) -> Arc<ThemeService>;
    fn study_sessions(&self) -> Arc<StudySessionService>;

    /// Directory that exports are written into.
    fn export_dir(&self) -> PathBuf;

    /// Directory that unit note paths are resolved against.
    fn notes_dir(&self) -> PathBuf;
}

#[derive(Clone)]
pub struct AppContext {
    syllabus: Arc<Syllabus>,
    tracker: Arc<ProgressTracker>,
    themes: Arc<ThemeService>,
    study_sessions: Arc<StudySessionService>,
    export_dir: PathBuf,
    notes_dir: PathBuf,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            syllabus: app.syllabus(),
            tracker: app.tracker(),
            themes: app.themes(),
            study_sessions: app.study_sessions(),
            export_dir: app.export_dir(),
            notes_dir: app.notes_dir(),
        }
    }

    #[must_use]
    pub fn syllabus(&self) -> Arc<Syllabus> {
        Arc::clone(&self.syllabus)
    }

    #[must_use]
    pub fn tracker(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.tracker)
    }

    #[must_use]
    pub fn themes(&self) -> Arc<ThemeService> {
        Arc::clone(&self.themes)
    }

    #[must_use]
    pub fn study_sessions(&self) -> Arc<StudySessionService> {
        Arc::clone(&self.study_sessions)
    }

    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone()
    }

    #[must_use]
    pub fn notes_dir(&self) -> PathBuf {
        self.notes_dir.clone()
    }
}

/// Window-wide UI state shared by the layout and the views.
#[derive(Clone, Copy)]
pub struct UiState {
    pub theme: Signal<Theme>,
    /// Set by the reset shortcut; the checklist view shows the confirmation.
    pub confirm_reset: Signal<bool>,
    /// True once the user picked a theme in this window.
    theme_chosen: Signal<bool>,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Signal::new(Theme::default()),
            confirm_reset: Signal::new(false),
            theme_chosen: Signal::new(false),
        }
    }

    /// Flip the theme now and persist it in the background.
    pub fn toggle_theme(self, themes: Arc<ThemeService>) {
        let mut theme = self.theme;
        let mut chosen = self.theme_chosen;
        let current = theme();
        chosen.set(true);
        theme.set(current.toggled());
        spawn(async move {
            let _ = themes.toggle(current).await;
        });
    }

    /// Apply the stored preference unless the user already toggled.
    pub fn apply_loaded_theme(self, loaded: Theme) -> bool {
        if *self.theme_chosen.peek() {
            return false;
        }
        let mut theme = self.theme;
        theme.set(loaded);
        true
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
