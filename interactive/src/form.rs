use leptos::prelude::*;
use postwall_shared::alert::AlertKind;
use postwall_shared::form::{FormSettings, FormSurface, InFlight, Notify};

use crate::alert::Alerts;
use crate::nav;

/// Submit button state and optional inline error line of one form.
#[derive(Clone)]
pub struct FormControl {
    busy: RwSignal<bool>,
    label: RwSignal<String>,
    inline_error: Option<RwSignal<Option<String>>>,
    alerts: Alerts,
}

impl FormControl {
    pub fn new(settings: &FormSettings, alerts: Alerts) -> Self {
        Self {
            busy: RwSignal::new(false),
            label: RwSignal::new(settings.idle_label.to_string()),
            inline_error: None,
            alerts,
        }
    }

    /// Failures go to an error line under the form instead of an alert.
    pub fn with_inline_error(mut self) -> Self {
        self.inline_error = Some(RwSignal::new(None));
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get_untracked()
    }
}

impl Notify for FormControl {
    fn alert(&self, message: &str, kind: AlertKind) {
        self.alerts.show(message, kind);
    }
}

impl FormSurface for FormControl {
    fn set_busy(&self, busy: bool, label: &str) {
        self.busy.set(busy);
        self.label.set(label.to_string());
    }

    fn clear_inline_error(&self) {
        if let Some(err) = self.inline_error {
            err.set(None);
        }
    }

    fn show_inline_error(&self, message: &str) -> bool {
        match self.inline_error {
            Some(err) => {
                err.set(Some(message.to_string()));
                true
            }
            None => false,
        }
    }
}

/// In-flight flag for a button that is not part of a form. Hold a
/// [`postwall_shared::form::Busy`] guard over it for the duration of the call.
#[derive(Clone, Copy)]
pub struct BusyFlag(RwSignal<bool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self(RwSignal::new(false))
    }

    /// Tracked read, for `disabled=` bindings.
    pub fn is_busy(&self) -> bool {
        self.0.get()
    }
}

impl InFlight for BusyFlag {
    fn get(&self) -> bool {
        self.0.get_untracked()
    }

    fn set(&self, busy: bool) {
        self.0.set(busy);
    }
}

/// Schedules the form's success redirect, if it has one. `suffix` is appended
/// to the configured path (the post id for edits).
pub fn follow_redirect(settings: &FormSettings, suffix: &str) {
    if let Some(redirect) = settings.redirect {
        nav::redirect_after(format!("{}{}", redirect.path, suffix), redirect.delay_ms);
    }
}

#[component]
pub fn SubmitButton(control: FormControl) -> impl IntoView {
    let busy = control.busy;
    let label = control.label;

    view! {
        <button
            class="postwall-btn bg-darkRed text-white px-4 py-2 rounded hover:bg-darkBlue mt-2"
            type="submit"
            disabled=move || busy.get()
        >
            {move || label.get()}
        </button>
    }
}

#[component]
pub fn InlineError(control: FormControl) -> impl IntoView {
    let inline_error = control.inline_error;

    move || {
        inline_error
            .and_then(|err| err.get())
            .map(|msg| view! { <p id="errorMessage" class="text-red-500 mt-2">{msg}</p> })
    }
}
