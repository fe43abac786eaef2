use std::time::Duration;

use leptos::prelude::set_timeout;
use web_sys::window;

/// Non-empty query string parameter of the current page.
pub fn query_param(name: &str) -> Option<String> {
    let href = window()?.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params()
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn redirect(path: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.location().set_href(path) {
            tracing::error!(%path, error = ?e, "redirect failed");
        }
    }
}

pub fn redirect_after(path: String, delay_ms: u32) {
    set_timeout(move || redirect(&path), Duration::from_millis(delay_ms.into()));
}

pub fn reload() {
    if let Some(win) = window() {
        let _ = win.location().reload();
    }
}

pub fn now_ms() -> u64 {
    web_sys::js_sys::Date::now() as u64
}

fn encode(s: &str) -> String {
    web_sys::js_sys::encode_uri_component(s)
        .as_string()
        .unwrap_or_default()
}

pub fn post_href(id: i64) -> String {
    format!("/post/?id={}", id)
}

pub fn edit_post_href(id: i64) -> String {
    format!("/post/edit/?id={}", id)
}

pub fn profile_href(name: &str) -> String {
    format!("/profile/userprofile?username={}", encode(name))
}
