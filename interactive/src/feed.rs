use std::sync::Arc;

use leptos::prelude::*;
use postwall_shared::alert::AlertKind;
use postwall_shared::config::ClientConfig;
use postwall_shared::pagination::Pager;
use postwall_shared::post::{card_image, display_date, post_dom_id, tags_label};
use postwall_shared::query::{Include, PostQuery, SortOrder};
use postwall_shared::Post;
use wasm_bindgen_futures::spawn_local;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::nav;
use crate::spinner::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Loading,
    Ready,
    Empty,
    Failed,
}

/// Everything the feed, its pager and its controls share. Changing `page`,
/// `sort_order` or `query` re-fetches.
#[derive(Clone, Copy)]
pub struct FeedState {
    pub page: RwSignal<u32>,
    pub sort_order: RwSignal<SortOrder>,
    pub query: RwSignal<String>,
    posts: RwSignal<Vec<Post>>,
    pager: RwSignal<Option<Pager>>,
    status: RwSignal<FeedStatus>,
    request: RwSignal<u64>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(1),
            sort_order: RwSignal::new(SortOrder::default()),
            query: RwSignal::new(String::new()),
            posts: RwSignal::new(Vec::new()),
            pager: RwSignal::new(None),
            status: RwSignal::new(FeedStatus::Loading),
            request: RwSignal::new(0),
        }
    }

    /// Search always starts from the newest first page.
    pub fn search(&self, query: String) {
        self.sort_order.set(SortOrder::Desc);
        self.page.set(1);
        self.query.set(query);
    }

    pub fn apply_sort(&self, order: SortOrder) {
        self.query.set(String::new());
        self.page.set(1);
        self.sort_order.set(order);
    }
}

/// Mounted into `#postFeed`.
#[component]
pub fn PostFeed(state: FeedState) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let spinner = expect_context::<Spinner>();
    let config = expect_context::<Arc<ClientConfig>>();

    Effect::new(move |_| {
        let mut q = PostQuery::new(config.page_size, state.page.get());
        q.sort_order = state.sort_order.get();
        q.query = state.query.get();
        q.include = Include {
            author: true,
            ..Include::default()
        };

        let seq = state.request.get_untracked() + 1;
        state.request.set(seq);
        state.status.set(FeedStatus::Loading);
        spinner.show();

        let (api, spinner, page_size) = (api.clone(), spinner.clone(), config.page_size);
        spawn_local(async move {
            let result = api.list_posts(&q).await;
            // A newer request has taken over.
            if state.request.get_untracked() != seq {
                return;
            }
            match result {
                Ok(env) if env.data.is_empty() => {
                    state.posts.set(Vec::new());
                    state.pager.set(None);
                    state.status.set(FeedStatus::Empty);
                }
                Ok(env) => {
                    let meta = env.meta.unwrap_or_default();
                    tracing::debug!(page = q.page, count = env.data.len(), "feed page loaded");
                    state.pager.set(Some(Pager::from_meta(q.page, &meta, page_size)));
                    state.posts.set(env.data);
                    state.status.set(FeedStatus::Ready);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load posts");
                    state.posts.set(Vec::new());
                    state.pager.set(None);
                    state.status.set(FeedStatus::Failed);
                }
            }
            spinner.hide();
        });
    });

    move || match state.status.get() {
        FeedStatus::Loading => view! { <p class="postwall-loading">"Loading posts..."</p> }.into_any(),
        FeedStatus::Empty => {
            view! { <p class="text-gray-500">"No posts match your search criteria."</p> }.into_any()
        }
        FeedStatus::Failed => {
            view! { <p class="text-red-500">"An error occurred while loading posts."</p> }.into_any()
        }
        FeedStatus::Ready => view! {
            <div class="postwall-feed grid grid-cols-1 md:grid-cols-3 gap-4">
                <For
                    each=move || state.posts.get()
                    key=|p| p.id
                    let:post
                >
                    <PostCard post=post />
                </For>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn PostCard(post: Post) -> impl IntoView {
    let author = post.author.as_ref().map(|a| a.name.clone()).unwrap_or_default();
    let alt = post
        .media
        .as_ref()
        .and_then(|m| m.alt.clone())
        .unwrap_or_else(|| post.title.clone());

    view! {
        <a id=post_dom_id(post.id) href=nav::post_href(post.id) class="postwall-card block border rounded overflow-hidden">
            <img src=card_image(post.media.as_ref()) alt=alt class="w-full h-48 object-cover" />
            <div class="p-4">
                <h2 class="text-lg font-bold">{post.title.clone()}</h2>
                <p class="text-sm text-gray-500">{author} " · " {display_date(&post.created)}</p>
                <p class="text-sm">"Tags: " {tags_label(&post.tags)}</p>
            </div>
        </a>
    }
}

/// Mounted into `#pagination`. Renders nothing when the last load produced
/// no pages.
#[component]
pub fn FeedPager(state: FeedState) -> impl IntoView {
    move || {
        state.pager.get().map(|pager| {
            view! {
                <div class="postwall-pager flex justify-center items-center gap-4 mt-6">
                    <button
                        id="prevPage"
                        class="postwall-btn"
                        disabled=pager.prev_disabled()
                        on:click=move |_| {
                            if let Some(p) = pager.prev_page() {
                                state.page.set(p);
                            }
                        }
                    >
                        "Previous"
                    </button>
                    <span>{pager.label()}</span>
                    <button
                        id="nextPage"
                        class="postwall-btn"
                        disabled=pager.next_disabled()
                        on:click=move |_| {
                            if let Some(p) = pager.next_page() {
                                state.page.set(p);
                            }
                        }
                    >
                        "Next"
                    </button>
                </div>
            }
        })
    }
}

/// Mounted into `#feedControls`: search box and sort order.
#[component]
pub fn FeedControls(state: FeedState) -> impl IntoView {
    let alerts = expect_context::<Alerts>();
    let search = RwSignal::new(String::new());
    let order = RwSignal::new(state.sort_order.get_untracked());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = search.get_untracked().trim().to_string();
        if query.is_empty() {
            alerts.show("Please enter a search term.", AlertKind::Error);
            return;
        }
        tracing::debug!(%query, "feed search");
        order.set(SortOrder::Desc);
        state.search(query);
    };

    let on_apply = move |_| {
        search.set(String::new());
        state.apply_sort(order.get_untracked());
    };

    view! {
        <div class="postwall-feed-controls flex flex-wrap gap-4 mb-4">
            <form id="searchForm" class="flex gap-2" on:submit=on_search>
                <input
                    id="searchInput"
                    class="postwall-input border rounded p-2"
                    type="search"
                    placeholder="Search posts..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button class="postwall-btn" type="submit">"Search"</button>
            </form>
            <div class="flex gap-2">
                <select
                    id="sortOrder"
                    class="postwall-input border rounded p-2"
                    prop:value=move || order.get().as_str()
                    on:change=move |ev| order.set(SortOrder::parse(&event_target_value(&ev)))
                >
                    <option value="desc">"Newest first"</option>
                    <option value="asc">"Oldest first"</option>
                </select>
                <button id="applySort" class="postwall-btn" type="button" on:click=on_apply>"Apply"</button>
            </div>
        </div>
    }
}
