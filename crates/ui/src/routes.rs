use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::{AppContext, UiState};
use crate::views::{ChecklistView, HistoryView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ChecklistView)] Checklist {},
        #[route("/history", HistoryView)] History {},
}

/// Keyboard shortcuts handled at window level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleTheme,
    RequestReset,
}

/// Ctrl/Cmd+K toggles the theme, Ctrl/Cmd+Shift+R asks to reset.
#[must_use]
pub fn shortcut_for(key: &Key, modifiers: Modifiers) -> Option<Shortcut> {
    if !modifiers.contains(Modifiers::CONTROL) && !modifiers.contains(Modifiers::META) {
        return None;
    }
    let Key::Character(value) = key else {
        return None;
    };
    if modifiers.contains(Modifiers::SHIFT) && value.eq_ignore_ascii_case("r") {
        return Some(Shortcut::RequestReset);
    }
    if value == "k" {
        return Some(Shortcut::ToggleTheme);
    }
    None
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_context_provider(UiState::new);
    let themes = ctx.themes();

    let themes_for_load = themes.clone();
    use_future(move || {
        let themes = themes_for_load.clone();
        async move {
            ui.apply_loaded_theme(themes.load().await);
        }
    });

    let on_keydown = move |evt: KeyboardEvent| {
        let Some(shortcut) = shortcut_for(&evt.data.key(), evt.data.modifiers()) else {
            return;
        };
        evt.prevent_default();
        match shortcut {
            Shortcut::ToggleTheme => ui.toggle_theme(themes.clone()),
            Shortcut::RequestReset => {
                let mut confirm_reset = ui.confirm_reset;
                confirm_reset.set(true);
            }
        }
    };

    let theme = (ui.theme)();

    rsx! {
        div {
            class: "app",
            "data-theme": "{theme}",
            tabindex: "0",
            onkeydown: on_keydown,
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.syllabus().title().to_owned();
    rsx! {
        header { class: "topbar",
            h1 { "{title} Progress Tracker" }
            nav {
                Link { to: Route::Checklist {}, "Checklist" }
                Link { to: Route::History {}, "Study sessions" }
            }
        }
    }
}
