//! Form submission, implemented once for every form on the site.
//!
//! A form is described by a row in the [`FormKind::settings`] table. The view
//! layer implements [`FormSurface`] for its controls and hands the driver the
//! one remote call the form makes.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use crate::alert::AlertKind;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    CreatePost,
    EditPost,
    UpdateProfile,
    Comment,
}

/// Where to go after a successful submit, and how long to wait first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    pub delay_ms: u32,
}

#[derive(Debug)]
pub struct FormSettings {
    pub kind: FormKind,
    pub required: &'static [&'static str],
    pub missing_message: &'static str,
    pub idle_label: &'static str,
    pub busy_label: &'static str,
    /// Empty means no alert on success.
    pub success_message: &'static str,
    pub failure_prefix: &'static str,
    pub failure_kind: AlertKind,
    pub redirect: Option<Redirect>,
}

static LOGIN: FormSettings = FormSettings {
    kind: FormKind::Login,
    required: &["email", "password"],
    missing_message: "Email and password are required!",
    idle_label: "Login",
    busy_label: "Logging in...",
    success_message: "Login successful! Redirecting to your profile...",
    failure_prefix: "Login failed",
    failure_kind: AlertKind::Error,
    redirect: Some(Redirect { path: "/profile/", delay_ms: 2000 }),
};

static REGISTER: FormSettings = FormSettings {
    kind: FormKind::Register,
    required: &["name", "email", "password"],
    missing_message: "All fields are required!",
    idle_label: "Register",
    busy_label: "Registering...",
    success_message: "Registration successful! Redirecting...",
    failure_prefix: "Registration failed",
    failure_kind: AlertKind::Error,
    redirect: Some(Redirect { path: "/auth/login/", delay_ms: 2000 }),
};

static CREATE_POST: FormSettings = FormSettings {
    kind: FormKind::CreatePost,
    required: &["title", "content"],
    missing_message: "Title and content are required to create a post.",
    idle_label: "Create Post",
    busy_label: "Posting...",
    success_message: "Post created successfully!",
    failure_prefix: "Failed to create post",
    failure_kind: AlertKind::Error,
    redirect: Some(Redirect { path: "/", delay_ms: 1500 }),
};

// The post id is appended by the caller.
static EDIT_POST: FormSettings = FormSettings {
    kind: FormKind::EditPost,
    required: &["title", "content"],
    missing_message: "Title and content are required to update a post.",
    idle_label: "Update Post",
    busy_label: "Updating...",
    success_message: "Post updated successfully!",
    failure_prefix: "Failed to update post",
    failure_kind: AlertKind::Error,
    redirect: Some(Redirect { path: "/post/?id=", delay_ms: 1500 }),
};

static UPDATE_PROFILE: FormSettings = FormSettings {
    kind: FormKind::UpdateProfile,
    required: &[],
    missing_message: "",
    idle_label: "Update Profile",
    busy_label: "Updating...",
    success_message: "Profile updated successfully!",
    failure_prefix: "Error updating profile",
    failure_kind: AlertKind::Warning,
    redirect: None,
};

static COMMENT: FormSettings = FormSettings {
    kind: FormKind::Comment,
    required: &["comment"],
    missing_message: "Please enter a comment.",
    idle_label: "Submit",
    busy_label: "Submitting...",
    success_message: "",
    failure_prefix: "Error posting comment",
    failure_kind: AlertKind::Error,
    redirect: None,
};

impl FormKind {
    pub fn settings(self) -> &'static FormSettings {
        match self {
            FormKind::Login => &LOGIN,
            FormKind::Register => &REGISTER,
            FormKind::CreatePost => &CREATE_POST,
            FormKind::EditPost => &EDIT_POST,
            FormKind::UpdateProfile => &UPDATE_PROFILE,
            FormKind::Comment => &COMMENT,
        }
    }
}

impl FormSettings {
    pub fn missing_fields(&self, values: &FormValues) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|name| values.get(name).is_empty())
            .collect()
    }

    pub fn failure_message(&self, err: &ApiError) -> String {
        format!("{}: {}", self.failure_prefix, err.user_message())
    }
}

/// Trimmed field values keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    fields: BTreeMap<&'static str, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.fields.insert(name, value.as_ref().trim().to_string());
        self
    }

    /// Missing fields read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Anything that can show a transient alert.
pub trait Notify {
    fn alert(&self, message: &str, kind: AlertKind);
}

/// The controls a form exposes to the driver.
pub trait FormSurface: Notify {
    /// Disables or re-enables the submit control and sets its label.
    fn set_busy(&self, busy: bool, label: &str);

    fn clear_inline_error(&self);

    /// Returns `false` when the form has no inline error element.
    fn show_inline_error(&self, message: &str) -> bool;
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Required fields were missing; nothing was sent.
    Rejected(Vec<&'static str>),
    Failed(ApiError),
    Done(T),
}

impl<T> SubmitOutcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            SubmitOutcome::Done(v) => Some(v),
            _ => None,
        }
    }
}

/// Validates, runs `op` once, reports the result and restores the submit
/// control whatever happens.
pub async fn submit<S, T, F, Fut>(
    settings: &FormSettings,
    values: &FormValues,
    surface: &S,
    op: F,
) -> SubmitOutcome<T>
where
    S: FormSurface + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    surface.clear_inline_error();
    surface.set_busy(true, settings.busy_label);

    let missing = settings.missing_fields(values);
    if !missing.is_empty() {
        tracing::debug!(form = ?settings.kind, ?missing, "form rejected before submit");
        surface.alert(settings.missing_message, AlertKind::Warning);
        surface.set_busy(false, settings.idle_label);
        return SubmitOutcome::Rejected(missing);
    }

    let outcome = match op().await {
        Ok(value) => {
            if !settings.success_message.is_empty() {
                surface.alert(settings.success_message, AlertKind::Success);
            }
            SubmitOutcome::Done(value)
        }
        Err(err) => {
            tracing::warn!(form = ?settings.kind, error = %err, "form submission failed");
            let message = settings.failure_message(&err);
            if !surface.show_inline_error(&message) {
                surface.alert(&message, settings.failure_kind);
            }
            SubmitOutcome::Failed(err)
        }
    };

    surface.set_busy(false, settings.idle_label);
    outcome
}

/// Whether a control has a call running.
pub trait InFlight {
    fn get(&self) -> bool;
    fn set(&self, busy: bool);
}

impl InFlight for Rc<Cell<bool>> {
    fn get(&self) -> bool {
        Cell::get(self)
    }

    fn set(&self, busy: bool) {
        Cell::set(self, busy)
    }
}

/// Marks a control busy for as long as it is held.
#[must_use]
#[derive(Debug)]
pub struct Busy<G: InFlight> {
    gate: G,
}

impl<G: InFlight> Busy<G> {
    /// `None` when the control already has a call running.
    pub fn acquire(gate: G) -> Option<Self> {
        if gate.get() {
            return None;
        }
        gate.set(true);
        Some(Self { gate })
    }
}

impl<G: InFlight> Drop for Busy<G> {
    fn drop(&mut self) {
        self.gate.set(false);
    }
}

/// Messages for an action gated behind a confirm prompt.
#[derive(Debug, Clone, Copy)]
pub struct ActionSettings {
    pub success_message: &'static str,
    pub failure_prefix: &'static str,
}

pub const DELETE_POST: ActionSettings = ActionSettings {
    success_message: "Post deleted successfully!",
    failure_prefix: "Failed to delete post",
};

#[derive(Debug, PartialEq)]
pub enum Confirmed<T> {
    Declined,
    Failed(ApiError),
    Done(T),
}

/// Waits for the confirm prompt, then runs `op` if the user agreed.
pub async fn confirm_then<N, C, T, F, Fut>(
    action: &ActionSettings,
    confirm: C,
    notify: &N,
    op: F,
) -> Confirmed<T>
where
    N: Notify + ?Sized,
    C: Future<Output = bool>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    if !confirm.await {
        return Confirmed::Declined;
    }
    match op().await {
        Ok(value) => {
            notify.alert(action.success_message, AlertKind::Success);
            Confirmed::Done(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "confirmed action failed");
            notify.alert(
                &format!("{}: {}", action.failure_prefix, err.user_message()),
                AlertKind::Error,
            );
            Confirmed::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_labels() {
        for kind in [
            FormKind::Login,
            FormKind::Register,
            FormKind::CreatePost,
            FormKind::EditPost,
            FormKind::UpdateProfile,
            FormKind::Comment,
        ] {
            let settings = kind.settings();
            assert_eq!(settings.kind, kind);
            assert!(!settings.idle_label.is_empty());
            assert!(!settings.busy_label.is_empty());
            assert!(!settings.failure_prefix.is_empty());
        }
    }

    #[test]
    fn missing_fields_follow_table_order() {
        let values = FormValues::new().with("email", "  ").with("password", "x");
        assert_eq!(FormKind::Login.settings().missing_fields(&values), vec!["email"]);
        assert_eq!(
            FormKind::Register.settings().missing_fields(&FormValues::new()),
            vec!["name", "email", "password"]
        );
        assert!(FormKind::UpdateProfile
            .settings()
            .missing_fields(&FormValues::new())
            .is_empty());
    }

    #[test]
    fn failure_message_uses_prefix() {
        let err = ApiError::Remote { status: 401, message: "Invalid email or password".into() };
        assert_eq!(
            FormKind::Login.settings().failure_message(&err),
            "Login failed: Invalid email or password"
        );
    }

    #[test]
    fn busy_blocks_a_second_call_until_dropped() {
        let flag = Rc::new(Cell::new(false));
        let first = Busy::acquire(flag.clone());
        assert!(first.is_some());
        assert!(flag.get());
        assert!(Busy::acquire(flag.clone()).is_none());

        drop(first);
        assert!(!flag.get());
        assert!(Busy::acquire(flag.clone()).is_some());
    }
}
