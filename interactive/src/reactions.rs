use leptos::prelude::*;
use postwall_shared::alert::AlertKind;
use postwall_shared::form::Busy;
use postwall_shared::post::{likes_label, total_reactions, LIKE_SYMBOL};
use wasm_bindgen_futures::spawn_local;

use crate::alert::Alerts;
use crate::api::ApiClient;
use crate::auth::AuthState;
use crate::form::BusyFlag;

/// Like toggle for a single post. The count shown is always the total the
/// server returns; nothing is changed until the call succeeds.
#[component]
pub fn LikeButton(post_id: i64, initial_total: i64) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<Alerts>();
    let auth = expect_context::<AuthState>();
    let total = RwSignal::new(initial_total);
    let busy = BusyFlag::new();

    let on_click = move |_| {
        let Some(guard) = Busy::acquire(busy) else {
            return;
        };
        let (api, alerts) = (api.clone(), alerts.clone());
        spawn_local(async move {
            match api.toggle_reaction(post_id, LIKE_SYMBOL).await {
                Ok(update) => total.set(total_reactions(&update.reactions)),
                Err(e) => {
                    tracing::warn!(post_id, error = %e, "reaction toggle failed");
                    alerts.show("Error toggling reaction. Please try again.", AlertKind::Error);
                }
            }
            drop(guard);
        });
    };

    view! {
        <div class="postwall-likes flex items-center gap-2 mt-4">
            <span id="likeCount">{move || likes_label(total.get())}</span>
            <button
                id="likeButton"
                class="postwall-btn"
                on:click=on_click
                disabled=move || busy.is_busy() || auth.session.with(|s| s.is_none())
            >
                {move || if busy.is_busy() { "Processing...".to_string() } else { format!("{} Like", LIKE_SYMBOL) }}
            </button>
        </div>
    }
}
