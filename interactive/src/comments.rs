use leptos::prelude::*;
use postwall_shared::form::{self, FormKind, FormValues, SubmitOutcome};
use postwall_shared::post::display_timestamp;
use postwall_shared::Comment;
use wasm_bindgen_futures::spawn_local;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::auth::AuthState;
use crate::form::{FormControl, SubmitButton};

/// Comment list of a single post plus the form for adding one.
#[component]
pub fn CommentSection(post_id: i64, comments: Vec<Comment>) -> impl IntoView {
    let comments = RwSignal::new(comments);

    view! {
        <section class="postwall-comments mt-6">
            <h3 class="text-xl font-semibold mb-2">"Comments"</h3>
            <div id="commentsContainer" class="flex flex-col gap-2">
                <Show
                    when=move || comments.with(|c| !c.is_empty())
                    fallback=|| view! { <p class="text-gray-500">"No comments available"</p> }
                >
                    <For
                        each=move || comments.get()
                        key=|c| c.id
                        let:comment
                    >
                        <CommentItem comment=comment />
                    </For>
                </Show>
            </div>
            <CommentForm post_id=post_id comments=comments />
        </section>
    }
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    let owner = comment.owner.clone().unwrap_or_else(|| "Anonymous".to_string());

    view! {
        <div class="postwall-comment border-b py-2">
            <p class="font-semibold">{owner}</p>
            <p>{comment.body.clone()}</p>
            <p class="text-sm text-gray-500">"Posted on: " {display_timestamp(&comment.created)}</p>
        </div>
    }
}

/// Appends the comment the server returns instead of refetching the post.
#[component]
fn CommentForm(post_id: i64, comments: RwSignal<Vec<Comment>>) -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let api = expect_context::<ApiClient>();
    let settings = FormKind::Comment.settings();
    let control = FormControl::new(settings, expect_context::<Alerts>());
    let body = RwSignal::new(String::new());

    let on_submit = {
        let control = control.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if control.is_busy() {
                return;
            }
            let values = FormValues::new().with("comment", body.get_untracked());
            let (control, api) = (control.clone(), api.clone());
            spawn_local(async move {
                let outcome = form::submit(settings, &values, &control, || {
                    api.post_comment(post_id, values.get("comment"))
                })
                .await;
                if let SubmitOutcome::Done(comment) = outcome {
                    tracing::debug!(post_id, comment_id = comment.id, "comment added");
                    comments.update(|list| list.push(comment));
                    body.set(String::new());
                }
            });
        }
    };

    move || {
        if auth.session.with(|s| s.is_some()) {
            view! {
                <form id="commentForm" class="postwall-comment-form mt-4 flex flex-col" on:submit=on_submit.clone()>
                    <textarea
                        id="commentInput"
                        class="postwall-textarea border rounded p-2"
                        placeholder="Write a comment..."
                        prop:value=move || body.get()
                        on:input=move |ev| body.set(event_target_value(&ev))
                    />
                    <SubmitButton control=control.clone() />
                </form>
            }
            .into_any()
        } else {
            view! { <p class="postwall-hint text-gray-500 mt-4">"Log in to comment."</p> }.into_any()
        }
    }
}
