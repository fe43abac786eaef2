use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use leptos::prelude::*;
use postwall_shared::alert::{
    open_confirm, AlertKind, ConfirmReply, ConfirmResponder, FADE_IN_DELAY_MS, FADE_OUT_MS,
};
use postwall_shared::form::Notify;

#[derive(Debug, Clone, PartialEq)]
pub struct AlertEntry {
    pub id: u64,
    pub message: String,
    pub kind: AlertKind,
    pub visible: bool,
    pub confirm: bool,
}

/// Alert queue shared by every mounted component.
///
/// `mounted` is false when the page has no `#alertContainer`; alerts are then
/// dropped and confirm prompts answer `false` straight away.
#[derive(Clone)]
pub struct Alerts {
    entries: RwSignal<Vec<AlertEntry>>,
    responders: Arc<Mutex<HashMap<u64, ConfirmResponder>>>,
    next_id: Arc<AtomicU64>,
    mounted: bool,
    duration_ms: u32,
}

fn after(ms: u32, f: impl FnOnce() + 'static) {
    set_timeout(f, Duration::from_millis(ms.into()));
}

impl Alerts {
    pub fn new(mounted: bool, duration_ms: u32) -> Self {
        Self {
            entries: RwSignal::new(Vec::new()),
            responders: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            mounted,
            duration_ms,
        }
    }

    fn push(&self, message: &str, kind: AlertKind, confirm: bool) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.update(|list| {
            list.push(AlertEntry {
                id,
                message: message.to_string(),
                kind,
                visible: false,
                confirm,
            })
        });
        let entries = self.entries;
        after(FADE_IN_DELAY_MS, move || set_visible(entries, id, true));
        id
    }

    pub fn show(&self, message: &str, kind: AlertKind) {
        self.show_for(message, kind, self.duration_ms);
    }

    pub fn show_for(&self, message: &str, kind: AlertKind, duration_ms: u32) {
        if !self.mounted {
            tracing::debug!(%message, kind = kind.as_str(), "no alert container, alert dropped");
            return;
        }
        let id = self.push(message, kind, false);
        let entries = self.entries;
        after(duration_ms, move || {
            set_visible(entries, id, false);
            after(FADE_OUT_MS, move || entries.update(|list| list.retain(|e| e.id != id)));
        });
    }

    /// Shows a confirm prompt. It stays up until one of its buttons is used.
    pub fn confirm(&self, message: &str) -> ConfirmReply {
        let (responder, reply) = open_confirm(self.mounted);
        let Some(responder) = responder else {
            tracing::debug!(%message, "no alert container, confirm declined");
            return reply;
        };
        let id = self.push(message, AlertKind::Warning, true);
        if let Ok(mut pending) = self.responders.lock() {
            pending.insert(id, responder);
        }
        reply
    }

    pub fn respond(&self, id: u64, confirmed: bool) {
        let responder = self.responders.lock().ok().and_then(|mut p| p.remove(&id));
        if let Some(responder) = responder {
            responder.respond(confirmed);
        }
        self.entries.update(|list| list.retain(|e| e.id != id));
    }

    /// Closes an alert early. A pending confirm is answered with `false`.
    pub fn dismiss(&self, id: u64) {
        self.respond(id, false);
    }
}

fn set_visible(entries: RwSignal<Vec<AlertEntry>>, id: u64, visible: bool) {
    entries.update(|list| {
        if let Some(entry) = list.iter_mut().find(|e| e.id == id) {
            entry.visible = visible;
        }
    });
}

impl Notify for Alerts {
    fn alert(&self, message: &str, kind: AlertKind) {
        self.show(message, kind);
    }
}

/// Mounted into `#alertContainer`.
#[component]
pub fn AlertStack() -> impl IntoView {
    let alerts = expect_context::<Alerts>();
    let entries = alerts.entries;

    view! {
        <div class="postwall-alerts flex flex-col gap-2">
            <For
                each=move || entries.get()
                key=|e| e.id
                let:entry
            >
                <AlertItem entry=entry />
            </For>
        </div>
    }
}

#[component]
fn AlertItem(entry: AlertEntry) -> impl IntoView {
    let alerts = expect_context::<Alerts>();
    let id = entry.id;
    let entries = alerts.entries;

    let class = move || {
        entries.with(|list| {
            list.iter()
                .find(|e| e.id == id)
                .map(|e| e.kind.classes(e.visible))
                .unwrap_or_default()
        })
    };

    let controls = if entry.confirm {
        let (yes, no) = (alerts.clone(), alerts.clone());
        view! {
            <div class="flex gap-2">
                <button class="px-3 py-1 rounded bg-white text-black" on:click=move |_| yes.respond(id, true)>
                    "Confirm"
                </button>
                <button class="px-3 py-1 rounded border border-white" on:click=move |_| no.respond(id, false)>
                    "Cancel"
                </button>
            </div>
        }
        .into_any()
    } else {
        view! {
            <button class="text-xl font-bold hover:opacity-75" on:click=move |_| alerts.dismiss(id)>
                "\u{00D7}"
            </button>
        }
        .into_any()
    };

    view! {
        <div class=class role="alert">
            <span class="font-semibold">{entry.message}</span>
            {controls}
        </div>
    }
}
