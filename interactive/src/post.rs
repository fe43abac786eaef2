use leptos::prelude::*;
use postwall_shared::alert::AlertKind;
use postwall_shared::form::{self, Busy, Confirmed, FormKind, FormValues, SubmitOutcome, DELETE_POST};
use postwall_shared::post::{
    display_timestamp, is_valid_image_url, post_dom_id, tags_label, total_reactions, EditTarget,
    DEFAULT_AVATAR,
};
use postwall_shared::query::Include;
use postwall_shared::{Post, PostDraft};
use wasm_bindgen_futures::spawn_local;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::auth::AuthState;
use crate::comments::CommentSection;
use crate::form::{follow_redirect, BusyFlag, FormControl, SubmitButton};
use crate::nav;
use crate::reactions::LikeButton;

/// Input signals shared by the create and edit forms.
#[derive(Clone, Copy)]
struct PostFields {
    title: RwSignal<String>,
    content: RwSignal<String>,
    image_url: RwSignal<String>,
    image_alt: RwSignal<String>,
    tags: RwSignal<String>,
}

impl PostFields {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            content: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
            image_alt: RwSignal::new(String::new()),
            tags: RwSignal::new(String::new()),
        }
    }

    fn values(&self) -> FormValues {
        FormValues::new()
            .with("title", self.title.get_untracked())
            .with("content", self.content.get_untracked())
    }

    fn draft(&self) -> PostDraft {
        PostDraft::from_inputs(
            &self.title.get_untracked(),
            &self.content.get_untracked(),
            &self.image_url.get_untracked(),
            &self.image_alt.get_untracked(),
            &self.tags.get_untracked(),
        )
    }

    fn fill(&self, post: &Post) {
        self.title.set(post.title.clone());
        self.content.set(post.body.clone().unwrap_or_default());
        let media = post.media.as_ref();
        self.image_url.set(media.map(|m| m.url.clone()).unwrap_or_default());
        self.image_alt
            .set(media.and_then(|m| m.alt.clone()).unwrap_or_default());
        self.tags.set(post.tags.join(", "));
    }
}

#[component]
fn PostInputs(fields: PostFields) -> impl IntoView {
    let PostFields { title, content, image_url, image_alt, tags } = fields;

    view! {
        <label for="title">"Title"</label>
        <input
            id="title"
            class="postwall-input border rounded p-2"
            type="text"
            prop:value=move || title.get()
            on:input=move |ev| title.set(event_target_value(&ev))
        />
        <label for="content">"Content"</label>
        <textarea
            id="content"
            class="postwall-textarea border rounded p-2"
            prop:value=move || content.get()
            on:input=move |ev| content.set(event_target_value(&ev))
        />
        <label for="image">"Image URL"</label>
        <input
            id="image"
            class="postwall-input border rounded p-2"
            type="url"
            prop:value=move || image_url.get()
            on:input=move |ev| image_url.set(event_target_value(&ev))
        />
        <label for="imageAlt">"Image description"</label>
        <input
            id="imageAlt"
            class="postwall-input border rounded p-2"
            type="text"
            prop:value=move || image_alt.get()
            on:input=move |ev| image_alt.set(event_target_value(&ev))
        />
        <label for="tags">"Tags (comma separated)"</label>
        <input
            id="tags"
            class="postwall-input border rounded p-2"
            type="text"
            prop:value=move || tags.get()
            on:input=move |ev| tags.set(event_target_value(&ev))
        />
    }
}

/// Mounted into `#createPostForm`.
#[component]
pub fn CreatePostForm() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let settings = FormKind::CreatePost.settings();
    let control = FormControl::new(settings, expect_context::<Alerts>());
    let fields = PostFields::new();

    let on_submit = {
        let control = control.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if control.is_busy() {
                return;
            }
            let (values, draft) = (fields.values(), fields.draft());
            let (control, api) = (control.clone(), api.clone());
            spawn_local(async move {
                let outcome = form::submit(settings, &values, &control, || api.create_post(&draft)).await;
                if let SubmitOutcome::Done(post) = outcome {
                    tracing::info!(post_id = post.id, "post created");
                    follow_redirect(settings, "");
                }
            });
        }
    };

    view! {
        <form class="postwall-form flex flex-col gap-2" on:submit=on_submit>
            <PostInputs fields=fields />
            <SubmitButton control=control />
        </form>
    }
}

/// Mounted into `#editPostForm`. Loads the post named by `?id=` and
/// pre-fills the inputs.
#[component]
pub fn EditPostForm() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<Alerts>();
    let settings = FormKind::EditPost.settings();
    let control = FormControl::new(settings, alerts.clone());
    let fields = PostFields::new();
    let target = RwSignal::new(EditTarget::from_query(nav::query_param("id").as_deref()));

    match target.get_untracked().id() {
        Some(id) => {
            let api = api.clone();
            spawn_local(async move {
                match api.get_post(id, Include::default()).await {
                    Ok(post) => {
                        fields.fill(&post);
                        target.update(|t| *t = t.loaded());
                    }
                    Err(e) => {
                        target.update(|t| *t = t.failed());
                        tracing::error!(post_id = id, error = %e, "failed to load post for editing");
                        alerts.show(
                            "Error loading post data for editing. Please try again.",
                            AlertKind::Error,
                        );
                    }
                }
            });
        }
        None => alerts.show(
            "No post ID found. Cannot load post for editing.",
            AlertKind::Warning,
        ),
    }

    let on_submit = {
        let control = control.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(id) = target.get_untracked().submittable() else {
                tracing::debug!("edit form has no loaded post, submit ignored");
                return;
            };
            if control.is_busy() {
                return;
            }
            let (values, draft) = (fields.values(), fields.draft());
            let (control, api) = (control.clone(), api.clone());
            spawn_local(async move {
                let outcome =
                    form::submit(settings, &values, &control, || api.update_post(id, &draft)).await;
                if outcome.ok().is_some() {
                    follow_redirect(settings, &id.to_string());
                }
            });
        }
    };

    view! {
        <form class="postwall-form flex flex-col gap-2" on:submit=on_submit>
            <PostInputs fields=fields />
            <SubmitButton control=control />
        </form>
    }
}

#[derive(Clone)]
enum PostView {
    Loading,
    Ready(Post),
    Failed(String),
    Deleted,
}

/// Mounted into `#singlePostContainer`.
#[component]
pub fn SinglePost() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(PostView::Loading);

    match nav::query_param("id").and_then(|id| id.parse::<i64>().ok()) {
        Some(id) => spawn_local(async move {
            match api.get_post(id, Include::all()).await {
                Ok(post) => state.set(PostView::Ready(post)),
                Err(e) => {
                    tracing::error!(post_id = id, error = %e, "failed to load post");
                    state.set(PostView::Failed(
                        "An error occurred while loading the post. Please try again later."
                            .to_string(),
                    ));
                }
            }
        }),
        None => state.set(PostView::Failed(
            "Post ID not found. Please select a post.".to_string(),
        )),
    }

    move || match state.get() {
        PostView::Loading => view! { <p class="postwall-loading">"Loading post..."</p> }.into_any(),
        PostView::Ready(post) => view! { <PostArticle post=post state=state /> }.into_any(),
        PostView::Failed(message) => view! {
            <div class="postwall-error text-red-500">
                <p>{message}</p>
                <button class="postwall-btn mt-2" on:click=|_| nav::reload()>"Retry"</button>
            </div>
        }
        .into_any(),
        PostView::Deleted => view! { <p class="text-gray-500">"This post has been deleted."</p> }.into_any(),
    }
}

#[component]
fn PostArticle(post: Post, state: RwSignal<PostView>) -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<Alerts>();
    let id = post.id;
    let author = post.author.clone();
    let author_name = author.as_ref().map(|a| a.name.clone()).unwrap_or_default();
    let avatar = author
        .as_ref()
        .and_then(|a| a.avatar.as_ref())
        .map(|m| m.url.clone())
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    let image = post
        .media
        .clone()
        .filter(|m| is_valid_image_url(&m.url));

    let is_author = {
        let author_name = author_name.clone();
        move || {
            auth.session
                .with(|s| s.as_ref().is_some_and(|s| !author_name.is_empty() && s.username == author_name))
        }
    };

    let deleting = BusyFlag::new();

    let on_delete = move |_| {
        let Some(guard) = Busy::acquire(deleting) else {
            return;
        };
        let reply = alerts.confirm("Are you sure you want to delete this post?");
        let (api, alerts) = (api.clone(), alerts.clone());
        spawn_local(async move {
            let outcome = form::confirm_then(&DELETE_POST, reply, &alerts, || api.delete_post(id)).await;
            drop(guard);
            if let Confirmed::Done(()) = outcome {
                tracing::info!(post_id = id, "post deleted");
                state.set(PostView::Deleted);
                nav::redirect_after("/".to_string(), 1500);
            }
        });
    };

    view! {
        <article id=post_dom_id(id) class="postwall-post flex flex-col gap-4">
            <h1 class="text-3xl font-bold">{post.title.clone()}</h1>
            {image.map(|m| {
                let alt = m.alt.clone().unwrap_or_default();
                view! { <img src=m.url class="w-full rounded" alt=alt /> }
            })}
            <p class="whitespace-pre-line">{post.body.clone().unwrap_or_default()}</p>
            <p class="text-sm">"Tags: " {tags_label(&post.tags)}</p>
            <div class="flex items-center gap-2">
                <img src=avatar class="w-8 h-8 rounded-full" alt="" />
                <a href=nav::profile_href(&author_name) class="font-semibold">{author_name.clone()}</a>
                <span class="text-sm text-gray-500">{display_timestamp(&post.created)}</span>
            </div>
            <Show when=is_author>
                <div class="flex gap-2">
                    <a href=nav::edit_post_href(id) class="postwall-btn">"Edit"</a>
                    <button
                        class="postwall-btn bg-red-600 text-white"
                        disabled=move || deleting.is_busy()
                        on:click=on_delete.clone()
                    >
                        "Delete"
                    </button>
                </div>
            </Show>
            <LikeButton post_id=id initial_total=total_reactions(&post.reactions) />
            <CommentSection post_id=id comments=post.comments.clone() />
        </article>
    }
}
