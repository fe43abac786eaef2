mod alert;
mod api;
mod auth;
mod comments;
mod config;
mod feed;
mod form;
mod logging;
mod nav;
mod post;
mod profile;
mod reactions;
mod spinner;
mod storage;
mod theme;

use std::sync::Arc;

use leptos::prelude::*;
use postwall_shared::config::ClientConfig;
use postwall_shared::session::SessionContext;
use wasm_bindgen::JsCast;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::auth::AuthState;
use crate::feed::FeedState;
use crate::spinner::Spinner;
use crate::storage::BrowserStore;

/// Handles every mounted island receives through context.
#[derive(Clone)]
struct AppContext {
    config: Arc<ClientConfig>,
    api: ApiClient,
    auth: AuthState,
    alerts: Alerts,
    spinner: Spinner,
}

impl AppContext {
    fn provide(&self) {
        provide_context(self.config.clone());
        provide_context(self.api.clone());
        provide_context(self.auth.clone());
        provide_context(self.alerts.clone());
        provide_context(self.spinner.clone());
    }
}

/// Mounts `view` into the element with `id`, if the page has one.
fn mount<F, V>(document: &web_sys::Document, id: &str, ctx: &AppContext, view: F)
where
    F: FnOnce() -> V + 'static,
    V: IntoView + 'static,
{
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    tracing::debug!(%id, "mounting");
    let html_el: web_sys::HtmlElement = el.unchecked_into();
    let ctx = ctx.clone();
    leptos::mount::mount_to(html_el, move || {
        ctx.provide();
        view()
    })
    .forget();
}

fn main() {
    console_error_panic_hook::set_once();

    let config = Arc::new(config::load());
    logging::init(&config.log_level);

    let document = web_sys::window()
        .expect("no window")
        .document()
        .expect("no document");

    let session = SessionContext::new(BrowserStore, config.profile_cache_max_age_ms);
    let present = |id: &str| document.get_element_by_id(id).is_some();
    let ctx = AppContext {
        api: ApiClient::new(config.clone(), session.clone()),
        auth: AuthState::new(session),
        alerts: Alerts::new(present("alertContainer"), config.alert_duration_ms),
        spinner: Spinner::new(config.spinner_failsafe_ms),
        config,
    };
    tracing::info!(
        api = %ctx.config.api_base,
        logged_in = ctx.auth.is_logged_in(),
        "starting postwall"
    );

    theme::apply_stored();
    ctx.spinner.show();

    mount(&document, "alertContainer", &ctx, || view! { <alert::AlertStack /> });
    mount(&document, "spinner", &ctx, || view! { <spinner::SpinnerOverlay /> });
    mount(&document, "themeToggle", &ctx, || view! { <theme::ThemeToggle /> });
    mount(&document, "logoutBtn", &ctx, || view! { <auth::LogoutButton /> });
    mount(&document, "loginForm", &ctx, || view! { <auth::LoginForm /> });
    mount(&document, "registerForm", &ctx, || view! { <auth::RegisterForm /> });
    mount(&document, "createPostForm", &ctx, || view! { <post::CreatePostForm /> });
    mount(&document, "editPostForm", &ctx, || view! { <post::EditPostForm /> });
    mount(&document, "updateProfileForm", &ctx, || view! { <profile::MyProfile /> });
    mount(&document, "authorContainer", &ctx, || view! { <profile::UserProfile /> });
    mount(&document, "singlePostContainer", &ctx, || view! { <post::SinglePost /> });

    // The feed hides the spinner itself once its first page is in.
    if present("postFeed") {
        let state = FeedState::new();
        mount(&document, "postFeed", &ctx, move || view! { <feed::PostFeed state=state /> });
        mount(&document, "pagination", &ctx, move || view! { <feed::FeedPager state=state /> });
        mount(&document, "feedControls", &ctx, move || view! { <feed::FeedControls state=state /> });
    } else {
        ctx.spinner.hide();
    }
}
