use leptos::prelude::*;
use postwall_shared::alert::AlertKind;
use postwall_shared::follow::FollowToggle;
use postwall_shared::form::{self, FormKind, FormValues, SubmitOutcome};
use postwall_shared::post::{is_valid_image_url, DEFAULT_AVATAR};
use postwall_shared::{Media, Post, Profile, ProfileSummary, ProfileUpdate};
use wasm_bindgen_futures::spawn_local;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::auth::AuthState;
use crate::form::{FormControl, SubmitButton};
use crate::nav;

type FollowList = Option<(&'static str, Vec<ProfileSummary>)>;

fn avatar_url(avatar: Option<&Media>) -> String {
    avatar
        .map(|m| m.url.clone())
        .filter(|u| is_valid_image_url(u))
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string())
}

#[derive(Clone)]
enum ProfileView {
    Loading,
    Ready(Profile),
    Failed(String),
}

/// Mounted into `#updateProfileForm`: the signed-in user's own profile and
/// the form for editing it.
#[component]
pub fn MyProfile() -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(ProfileView::Loading);

    match auth.username() {
        None => {
            tracing::info!("no session, redirecting to login");
            nav::redirect("/auth/login/");
        }
        Some(username) => match auth.context.cached_profile(&username, nav::now_ms()) {
            Some(profile) => {
                tracing::debug!(%username, "profile served from cache");
                state.set(ProfileView::Ready(profile));
            }
            None => {
                let auth = auth.clone();
                spawn_local(async move {
                    match api.fetch_profile(&username).await {
                        Ok(profile) => {
                            auth.context.cache_profile(&profile, nav::now_ms());
                            state.set(ProfileView::Ready(profile));
                        }
                        Err(e) => {
                            tracing::error!(%username, error = %e, "failed to load profile");
                            state.set(ProfileView::Failed(
                                "Failed to load profile. Please try again later.".to_string(),
                            ));
                        }
                    }
                });
            }
        },
    }

    move || match state.get() {
        ProfileView::Loading => view! { <p class="postwall-loading">"Loading profile..."</p> }.into_any(),
        ProfileView::Failed(message) => view! { <p class="text-red-500">{message}</p> }.into_any(),
        ProfileView::Ready(profile) => {
            let (count, followers) = (profile.count.followers, profile.followers.clone());
            view! {
                <ProfileHeader
                    profile=profile.clone()
                    follower_count=Signal::derive(move || count)
                    followers=Signal::derive(move || followers.clone())
                />
                <ProfileUpdateForm profile=profile.clone() state=state />
                <ProfilePostGrid posts=profile.posts />
            }
            .into_any()
        }
    }
}

#[component]
fn ProfileUpdateForm(profile: Profile, state: RwSignal<ProfileView>) -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let api = expect_context::<ApiClient>();
    let settings = FormKind::UpdateProfile.settings();
    let control = FormControl::new(settings, expect_context::<Alerts>());
    let name = RwSignal::new(profile.name.clone());
    let avatar = RwSignal::new(profile.avatar.as_ref().map(|m| m.url.clone()).unwrap_or_default());
    let bio = RwSignal::new(profile.bio.clone().unwrap_or_default());
    let current = profile.name;

    let on_submit = {
        let control = control.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if control.is_busy() {
                return;
            }
            let update = ProfileUpdate::from_inputs(
                &name.get_untracked(),
                &avatar.get_untracked(),
                &bio.get_untracked(),
            );
            let new_name = update.name.clone().unwrap_or_else(|| current.clone());
            let (control, api, auth, current) = (control.clone(), api.clone(), auth.clone(), current.clone());
            spawn_local(async move {
                let (client, old_name, fresh_name) = (&api, &current, &new_name);
                let update = &update;
                let outcome = form::submit(settings, &FormValues::new(), &control, || async move {
                    client.update_profile(old_name, update).await?;
                    client.fetch_profile(fresh_name).await
                })
                .await;
                if let SubmitOutcome::Done(fresh) = outcome {
                    if fresh.name != current {
                        auth.rename(&fresh.name);
                    }
                    auth.context.cache_profile(&fresh, nav::now_ms());
                    state.set(ProfileView::Ready(fresh));
                }
            });
        }
    };

    view! {
        <form name="updateProfile" class="postwall-form flex flex-col gap-2 my-6" on:submit=on_submit>
            <label for="name">"Name"</label>
            <input
                id="name"
                class="postwall-input border rounded p-2"
                type="text"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <label for="avatar">"Avatar URL"</label>
            <input
                id="avatar"
                class="postwall-input border rounded p-2"
                type="url"
                prop:value=move || avatar.get()
                on:input=move |ev| avatar.set(event_target_value(&ev))
            />
            <label for="bio">"Bio"</label>
            <textarea
                id="bio"
                class="postwall-textarea border rounded p-2"
                prop:value=move || bio.get()
                on:input=move |ev| bio.set(event_target_value(&ev))
            />
            <SubmitButton control=control />
        </form>
    }
}

/// Mounted into `#authorContainer`: someone's profile, looked up by
/// `?username=`.
#[component]
pub fn UserProfile() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(ProfileView::Loading);

    match nav::query_param("username") {
        None => state.set(ProfileView::Failed("Error: No username provided.".to_string())),
        Some(username) => spawn_local(async move {
            match api.fetch_profile(&username).await {
                Ok(profile) => state.set(ProfileView::Ready(profile)),
                Err(e) => {
                    tracing::error!(%username, error = %e, "failed to load user profile");
                    state.set(ProfileView::Failed(
                        "Error loading user profile. Please try again later.".to_string(),
                    ));
                }
            }
        }),
    }

    move || match state.get() {
        ProfileView::Loading => view! { <p class="postwall-loading">"Loading profile..."</p> }.into_any(),
        ProfileView::Failed(message) => view! { <p class="text-red-500">{message}</p> }.into_any(),
        ProfileView::Ready(profile) => view! { <OtherProfile profile=profile /> }.into_any(),
    }
}

/// Someone else's profile. The follow toggle owns the follower count and
/// list shown in the header.
#[component]
fn OtherProfile(profile: Profile) -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let viewer = auth.username();
    let toggle = RwSignal::new(FollowToggle::seed(
        viewer.as_deref(),
        &profile.followers,
        profile.count.followers,
    ));

    view! {
        <ProfileHeader
            profile=profile.clone()
            follower_count=Signal::derive(move || toggle.with(|t| t.follower_count()))
            followers=Signal::derive(move || toggle.with(|t| t.followers().to_vec()))
        />
        <FollowButton name=profile.name.clone() toggle=toggle />
        <ProfilePostGrid posts=profile.posts />
    }
}

#[component]
fn ProfileHeader(
    profile: Profile,
    follower_count: Signal<i64>,
    followers: Signal<Vec<ProfileSummary>>,
) -> impl IntoView {
    let list: RwSignal<FollowList> = RwSignal::new(None);
    let Profile { name, bio, avatar, following, count, .. } = profile;
    let name = if name.trim().is_empty() { "Your Name".to_string() } else { name };
    let bio = bio.filter(|b| !b.trim().is_empty()).unwrap_or_else(|| "Bio goes here...".to_string());

    view! {
        <div class="postwall-profile-header flex flex-col items-center gap-2">
            <img id="profileAvatar" src=avatar_url(avatar.as_ref()) alt=name.clone() class="w-24 h-24 rounded-full object-cover" />
            <h1 id="profileName" class="text-2xl font-bold">{name.clone()}</h1>
            <p id="profileBio">{bio}</p>
            <div class="flex gap-4 text-sm">
                <span id="postsCount">"Posts: " {count.posts}</span>
                <button
                    id="followerCount"
                    class="underline"
                    on:click=move |_| list.set(Some(("Followers", followers.get_untracked())))
                >
                    "Followers: " {move || follower_count.get()}
                </button>
                <button
                    id="followingCount"
                    class="underline"
                    on:click=move |_| list.set(Some(("Following", following.clone())))
                >
                    "Following: " {count.following}
                </button>
            </div>
            <FollowListModal list=list />
        </div>
    }
}

#[component]
fn FollowListModal(list: RwSignal<FollowList>) -> impl IntoView {
    move || {
        list.get().map(|(title, people)| {
            view! {
                <div
                    class="postwall-modal fixed inset-0 bg-black/50 flex items-center justify-center"
                    on:click=move |_| list.set(None)
                >
                    <div
                        class="bg-white dark:bg-gray-800 rounded p-4 max-h-96 overflow-y-auto"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <h2 class="text-lg font-bold mb-2">{title}</h2>
                        <ul class="flex flex-col gap-2">
                            {people
                                .into_iter()
                                .map(|p| {
                                    let label = if p.name.trim().is_empty() {
                                        "Unnamed User".to_string()
                                    } else {
                                        p.name.clone()
                                    };
                                    view! {
                                        <li class="flex items-center gap-2">
                                            <img src=avatar_url(p.avatar.as_ref()) alt="" class="w-8 h-8 rounded-full" />
                                            <a href=nav::profile_href(&p.name)>{label}</a>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                        <button class="postwall-btn mt-4" on:click=move |_| list.set(None)>"Close"</button>
                    </div>
                </div>
            }
        })
    }
}

/// Hidden on your own profile and when logged out.
#[component]
fn FollowButton(name: String, toggle: RwSignal<FollowToggle>) -> impl IntoView {
    let auth = expect_context::<AuthState>();
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<Alerts>();
    let viewer = auth.username();
    let own_profile = viewer.as_deref() == Some(name.as_str());
    let logged_in = viewer.is_some();

    let on_click = move |_| {
        let mut started = None;
        toggle.update(|t| started = t.begin());
        let Some(currently_following) = started else {
            return;
        };
        let (api, alerts, auth, name) = (api.clone(), alerts.clone(), auth.clone(), name.clone());
        spawn_local(async move {
            match api.follow_toggle(&name, currently_following).await {
                Ok(now_following) => {
                    toggle.update(|t| t.complete(now_following));
                    // The viewer's following count changed.
                    if let Some(viewer) = auth.username() {
                        auth.context.invalidate_profile(&viewer);
                    }
                }
                Err(e) => {
                    tracing::warn!(%name, error = %e, "follow toggle failed");
                    toggle.update(|t| t.fail());
                    alerts.show("Failed to update follow status. Please try again.", AlertKind::Error);
                }
            }
        });
    };

    view! {
        <div class="postwall-follow flex items-center justify-center gap-4 my-4">
            <Show when=move || logged_in && !own_profile>
                <button
                    id="followButton"
                    class="postwall-btn"
                    disabled=move || toggle.with(|t| t.is_busy())
                    on:click=on_click.clone()
                >
                    {move || toggle.with(|t| t.label())}
                </button>
            </Show>
        </div>
    }
}

#[component]
fn ProfilePostGrid(posts: Vec<Post>) -> impl IntoView {
    if posts.is_empty() {
        return view! { <p class="text-gray-500 text-center">"No posts to display."</p> }.into_any();
    }

    view! {
        <div id="postsContainer" class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-6">
            {posts
                .into_iter()
                .map(|post| {
                    let image = post.media.clone().filter(|m| is_valid_image_url(&m.url));
                    view! {
                        <div class="postwall-card border rounded overflow-hidden">
                            {match image {
                                Some(m) => {
                                    let alt = m.alt.clone().unwrap_or_else(|| post.title.clone());
                                    view! { <img src=m.url alt=alt class="w-full h-40 object-cover" /> }.into_any()
                                }
                                None => view! {
                                    <div class="w-full h-40 flex items-center justify-center bg-gray-200">"No Image"</div>
                                }
                                .into_any(),
                            }}
                            <div class="p-3">
                                <h3 class="font-bold">{post.title.clone()}</h3>
                                <a href=nav::post_href(post.id) class="text-blue-600">"View Post"</a>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}
