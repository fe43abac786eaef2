use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;
use futures::FutureExt;
use postwall_shared::alert::{confirm_channel, AlertKind, ConfirmReply};
use postwall_shared::follow::FollowToggle;
use postwall_shared::form::{
    self, Busy, Confirmed, FormKind, FormSurface, FormValues, Notify, SubmitOutcome,
};
use postwall_shared::{ApiError, PostDraft};

/// Records everything the driver does to the page.
#[derive(Default)]
struct RecordingForm {
    alerts: RefCell<Vec<(String, AlertKind)>>,
    busy: Cell<bool>,
    label: RefCell<String>,
    inline_error: Option<RefCell<Option<String>>>,
}

impl RecordingForm {
    fn with_inline_error() -> Self {
        Self {
            inline_error: Some(RefCell::new(None)),
            ..Self::default()
        }
    }

    fn alerts(&self) -> Vec<(String, AlertKind)> {
        self.alerts.borrow().clone()
    }
}

impl Notify for RecordingForm {
    fn alert(&self, message: &str, kind: AlertKind) {
        self.alerts.borrow_mut().push((message.to_string(), kind));
    }
}

impl FormSurface for RecordingForm {
    fn set_busy(&self, busy: bool, label: &str) {
        self.busy.set(busy);
        *self.label.borrow_mut() = label.to_string();
    }

    fn clear_inline_error(&self) {
        if let Some(slot) = &self.inline_error {
            *slot.borrow_mut() = None;
        }
    }

    fn show_inline_error(&self, message: &str) -> bool {
        match &self.inline_error {
            Some(slot) => {
                *slot.borrow_mut() = Some(message.to_string());
                true
            }
            None => false,
        }
    }
}

#[test]
fn login_with_empty_password_never_reaches_the_network() {
    let page = RecordingForm::default();
    let calls = Cell::new(0);
    let values = FormValues::new()
        .with("email", "alice@stud.noroff.no")
        .with("password", "   ");

    let outcome = block_on(form::submit(FormKind::Login.settings(), &values, &page, || {
        calls.set(calls.get() + 1);
        async { Ok::<_, ApiError>(()) }
    }));

    assert_eq!(outcome, SubmitOutcome::Rejected(vec!["password"]));
    assert_eq!(calls.get(), 0);
    assert_eq!(
        page.alerts(),
        vec![("Email and password are required!".to_string(), AlertKind::Warning)]
    );
    assert!(!page.busy.get());
    assert_eq!(*page.label.borrow(), "Login");
}

#[test]
fn login_failure_prefers_inline_error() {
    let page = RecordingForm::with_inline_error();
    let values = FormValues::new().with("email", "a@b.no").with("password", "pw");

    let outcome = block_on(form::submit(FormKind::Login.settings(), &values, &page, || async {
        Err::<(), _>(ApiError::Remote { status: 401, message: "Invalid email or password".into() })
    }));

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(page.alerts().is_empty());
    assert_eq!(
        page.inline_error.as_ref().unwrap().borrow().as_deref(),
        Some("Login failed: Invalid email or password")
    );
    assert!(!page.busy.get());
    assert_eq!(*page.label.borrow(), "Login");
}

#[test]
fn failure_without_inline_element_alerts_with_generic_fallback() {
    let page = RecordingForm::default();
    let values = FormValues::new().with("title", "Hi").with("content", "Body");

    block_on(form::submit(FormKind::CreatePost.settings(), &values, &page, || async {
        Err::<(), _>(ApiError::Remote { status: 500, message: String::new() })
    }));

    assert_eq!(
        page.alerts(),
        vec![(
            "Failed to create post: Something went wrong. Please try again.".to_string(),
            AlertKind::Error
        )]
    );
}

#[test]
fn create_post_submits_trimmed_tags() {
    let page = RecordingForm::default();
    let values = FormValues::new().with("title", "Hi").with("content", "Body");
    let sent = RefCell::new(None);

    let outcome = block_on(form::submit(FormKind::CreatePost.settings(), &values, &page, || {
        let draft = PostDraft::from_inputs(values.get("title"), values.get("content"), "", "", "a, b ,c");
        *sent.borrow_mut() = Some(draft.clone());
        async move { Ok::<_, ApiError>(draft) }
    }));

    let draft = sent.into_inner().unwrap();
    assert_eq!(draft.tags, vec!["a", "b", "c"]);
    assert_eq!(draft.title, "Hi");
    assert_eq!(draft.body, "Body");
    assert_eq!(outcome.ok().map(|d| d.tags.len()), Some(3));
    assert_eq!(
        page.alerts(),
        vec![("Post created successfully!".to_string(), AlertKind::Success)]
    );
    assert_eq!(*page.label.borrow(), "Create Post");
}

#[test]
fn profile_update_failure_is_a_warning() {
    let page = RecordingForm::default();
    block_on(form::submit(FormKind::UpdateProfile.settings(), &FormValues::new(), &page, || async {
        Err::<(), _>(ApiError::Network("offline".into()))
    }));
    assert_eq!(page.alerts()[0].1, AlertKind::Warning);
    assert!(page.alerts()[0].0.starts_with("Error updating profile: "));
}

/// Stand-in for the rendered feed: a list of DOM ids.
struct FakeFeed {
    nodes: RefCell<Vec<String>>,
    page: RecordingForm,
}

fn delete_post(feed: &FakeFeed, id: i64, confirm: ConfirmReply, remote: Result<(), ApiError>) -> bool {
    let outcome = block_on(form::confirm_then(&form::DELETE_POST, confirm, &feed.page, move || async move {
        remote
    }));
    if let Confirmed::Done(()) = outcome {
        let dom_id = postwall_shared::post::post_dom_id(id);
        feed.nodes.borrow_mut().retain(|n| *n != dom_id);
        true
    } else {
        false
    }
}

fn feed() -> FakeFeed {
    FakeFeed {
        nodes: RefCell::new(vec!["post-1".into(), "post-2".into()]),
        page: RecordingForm::default(),
    }
}

#[test]
fn confirmed_delete_removes_node() {
    let feed = feed();
    let (responder, reply) = confirm_channel();
    responder.respond(true);

    assert!(delete_post(&feed, 2, reply, Ok(())));
    assert_eq!(*feed.nodes.borrow(), vec!["post-1".to_string()]);
    assert_eq!(
        feed.page.alerts(),
        vec![("Post deleted successfully!".to_string(), AlertKind::Success)]
    );
}

#[test]
fn failed_delete_keeps_node_and_names_reason() {
    let feed = feed();
    let (responder, reply) = confirm_channel();
    responder.respond(true);

    let remote = Err(ApiError::Remote { status: 403, message: "You are not the owner".into() });
    assert!(!delete_post(&feed, 2, reply, remote));
    assert_eq!(feed.nodes.borrow().len(), 2);
    assert_eq!(
        feed.page.alerts(),
        vec![("Failed to delete post: You are not the owner".to_string(), AlertKind::Error)]
    );
}

#[test]
fn double_click_on_delete_sends_one_request() {
    let feed = feed();
    let deleting = Rc::new(Cell::new(false));
    let calls = Cell::new(0);

    // First click: the guard is held while the prompt is open.
    let guard = Busy::acquire(deleting.clone()).expect("first click starts");
    let (responder, reply) = confirm_channel();
    let mut first = Box::pin(form::confirm_then(&form::DELETE_POST, reply, &feed.page, || {
        calls.set(calls.get() + 1);
        async { Ok::<(), ApiError>(()) }
    }));
    assert!((&mut first).now_or_never().is_none());

    // Second click while the prompt is still up.
    assert!(Busy::acquire(deleting.clone()).is_none());

    responder.respond(true);
    assert_eq!(block_on(first), Confirmed::Done(()));
    drop(guard);

    assert_eq!(calls.get(), 1);
    assert_eq!(
        feed.page.alerts(),
        vec![("Post deleted successfully!".to_string(), AlertKind::Success)]
    );
    assert!(!deleting.get());
}

#[test]
fn declined_delete_releases_the_button() {
    let deleting = Rc::new(Cell::new(false));
    let guard = Busy::acquire(deleting.clone());
    let outcome = block_on(form::confirm_then(
        &form::DELETE_POST,
        ConfirmReply::declined(),
        &RecordingForm::default(),
        || async { Ok::<(), ApiError>(()) },
    ));
    drop(guard);
    assert_eq!(outcome, Confirmed::Declined);
    assert!(Busy::acquire(deleting).is_some());
}

#[test]
fn declined_delete_does_nothing() {
    let feed = feed();
    assert!(!delete_post(&feed, 1, ConfirmReply::declined(), Ok(())));
    assert_eq!(feed.nodes.borrow().len(), 2);
    assert!(feed.page.alerts().is_empty());
}

#[test]
fn follow_round_trip_against_fake_remote() {
    let mut toggle = FollowToggle::new(false, 10);
    let currently = toggle.begin().unwrap();
    let remote: Result<bool, ApiError> = Ok(!currently);
    match remote {
        Ok(state) => toggle.complete(state),
        Err(_) => toggle.fail(),
    }
    assert_eq!((toggle.label(), toggle.follower_count()), ("Unfollow", 11));

    let currently = toggle.begin().unwrap();
    let remote: Result<bool, ApiError> = Err(ApiError::Network("offline".into()));
    match remote {
        Ok(_) => unreachable!(),
        Err(_) => toggle.fail(),
    }
    assert!(currently);
    assert_eq!((toggle.label(), toggle.follower_count()), ("Unfollow", 11));
}
