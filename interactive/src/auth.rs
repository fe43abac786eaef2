use leptos::prelude::*;
use postwall_shared::alert::AlertKind;
use postwall_shared::form::{self, FormKind, FormValues, SubmitOutcome};
use postwall_shared::session::{Session, SessionContext};
use postwall_shared::{Credentials, Registration};
use wasm_bindgen_futures::spawn_local;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::form::{follow_redirect, FormControl, InlineError, SubmitButton};
use crate::nav;
use crate::storage::BrowserStore;

/// Reactive session shared via context. `context` is the persistent side;
/// `session` mirrors it for the views.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub session: RwSignal<Option<Session>>,
    pub context: SessionContext<BrowserStore>,
}

impl AuthState {
    pub fn new(context: SessionContext<BrowserStore>) -> Self {
        Self {
            session: RwSignal::new(context.load()),
            context,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with_untracked(|s| s.is_some())
    }

    pub fn username(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.username.clone()))
    }

    pub fn sign_in(&self, session: Session) {
        tracing::info!(username = %session.username, "signed in");
        self.context.save(&session);
        self.session.set(Some(session));
    }

    pub fn rename(&self, name: &str) {
        self.context.update_user_info(Some(name), None);
        self.session.set(self.context.load());
    }

    pub fn sign_out(&self) {
        self.context.clear();
        self.session.set(None);
    }
}

/// Mounted into `#loginForm`.
#[component]
pub fn LoginForm() -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let api = expect_context::<ApiClient>();
    let settings = FormKind::Login.settings();
    let control = FormControl::new(settings, expect_context::<Alerts>()).with_inline_error();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_submit = {
        let control = control.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if control.is_busy() {
                return;
            }
            let values = FormValues::new()
                .with("email", email.get_untracked())
                .with("password", password.get_untracked());
            let (control, api, auth) = (control.clone(), api.clone(), auth.clone());
            spawn_local(async move {
                let credentials = Credentials {
                    email: values.get("email").to_string(),
                    password: values.get("password").to_string(),
                };
                let outcome = form::submit(settings, &values, &control, || api.login(&credentials)).await;
                if let SubmitOutcome::Done(data) = outcome {
                    auth.sign_in(Session {
                        username: data.name,
                        token: data.access_token,
                    });
                    follow_redirect(settings, "");
                }
            });
        }
    };

    view! {
        <form name="login" class="postwall-form flex flex-col gap-2" on:submit=on_submit>
            <label for="email">"Email"</label>
            <input
                id="email"
                class="postwall-input border rounded p-2"
                type="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <label for="password">"Password"</label>
            <input
                id="password"
                class="postwall-input border rounded p-2"
                type="password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <InlineError control=control.clone() />
            <SubmitButton control=control />
        </form>
    }
}

/// Mounted into `#registerForm`.
#[component]
pub fn RegisterForm() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let settings = FormKind::Register.settings();
    let control = FormControl::new(settings, expect_context::<Alerts>()).with_inline_error();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_submit = {
        let control = control.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if control.is_busy() {
                return;
            }
            let values = FormValues::new()
                .with("name", name.get_untracked())
                .with("email", email.get_untracked())
                .with("password", password.get_untracked());
            let (control, api) = (control.clone(), api.clone());
            spawn_local(async move {
                let registration = Registration {
                    name: values.get("name").to_string(),
                    email: values.get("email").to_string(),
                    password: values.get("password").to_string(),
                };
                let outcome =
                    form::submit(settings, &values, &control, || api.register(&registration)).await;
                if let SubmitOutcome::Done(profile) = outcome {
                    tracing::info!(name = %profile.name, "registered");
                    follow_redirect(settings, "");
                }
            });
        }
    };

    view! {
        <form name="register" class="postwall-form flex flex-col gap-2" on:submit=on_submit>
            <label for="name">"Name"</label>
            <input
                id="name"
                class="postwall-input border rounded p-2"
                type="text"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <label for="email">"Email"</label>
            <input
                id="email"
                class="postwall-input border rounded p-2"
                type="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <label for="password">"Password"</label>
            <input
                id="password"
                class="postwall-input border rounded p-2"
                type="password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <InlineError control=control.clone() />
            <SubmitButton control=control />
        </form>
    }
}

/// Mounted into `#logoutBtn`.
#[component]
pub fn LogoutButton() -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let alerts = expect_context::<Alerts>();

    let on_logout = move |_| {
        auth.sign_out();
        alerts.show("You have been logged out.", AlertKind::Warning);
        nav::redirect_after("/auth/login/".to_string(), 1500);
    };

    view! {
        <button type="button" class="postwall-btn" on:click=on_logout>"Logout"</button>
    }
}
