use leptos::prelude::*;
use postwall_shared::session::{KeyValueStore, THEME_KEY};
use postwall_shared::theme::Theme;
use web_sys::window;

use crate::storage::BrowserStore;

fn stored() -> Theme {
    Theme::from_stored(BrowserStore.get(THEME_KEY).as_deref())
}

/// Sets or clears the `dark` class on `<html>`.
fn apply(theme: Theme) {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
    }
}

pub fn apply_stored() {
    apply(stored());
}

/// Mounted into `#themeToggle`.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = RwSignal::new(stored());

    let on_click = move |_| {
        let next = theme.get_untracked().toggled();
        theme.set(next);
        apply(next);
        BrowserStore.set(THEME_KEY, next.as_str());
        tracing::debug!(theme = next.as_str(), "theme changed");
    };

    view! {
        <button type="button" class="postwall-theme-toggle" aria-label="Toggle theme" on:click=on_click>
            <i id="themeIcon" class=move || format!("fa-solid {}", theme.get().icon())></i>
        </button>
    }
}
