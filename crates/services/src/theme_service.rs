use std::sync::Arc;

use storage::repository::KeyValueStore;
use tracing::warn;
use tracker_core::model::Theme;

use crate::persistence::{Persistence, Stored};

/// Key under which the theme token (`light`/`dark`) is kept.
pub const THEME_KEY: &str = "dataMiningTheme";

#[derive(Clone)]
pub struct ThemeService {
    kv: Arc<dyn KeyValueStore>,
}

impl ThemeService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored preference, or `Theme::Light` when none is usable.
    pub async fn load(&self) -> Theme {
        match self.kv.get(THEME_KEY).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                warn!(error = %err, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(error = %err, "theme storage unavailable");
                Theme::default()
            }
        }
    }

    pub async fn save(&self, theme: Theme) -> Persistence {
        match self.kv.set(THEME_KEY, theme.as_str()).await {
            Ok(()) => Persistence::Persisted,
            Err(err) => {
                warn!(error = %err, "theme not persisted");
                Persistence::InMemoryOnly
            }
        }
    }

    /// Flip `current` and persist the result.
    pub async fn toggle(&self, current: Theme) -> Stored<Theme> {
        let next = current.toggled();
        let persistence = self.save(next).await;
        Stored::new(next, persistence)
    }
}
