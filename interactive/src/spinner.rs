use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;
use postwall_shared::spinner::Failsafe;

/// Page-wide loading indicator. Each `show` arms a failsafe that hides the
/// spinner after a fixed time even if the work it covers never finishes.
#[derive(Clone)]
pub struct Spinner {
    visible: RwSignal<bool>,
    failsafe: Arc<Failsafe>,
    failsafe_ms: u32,
}

impl Spinner {
    pub fn new(failsafe_ms: u32) -> Self {
        Self {
            visible: RwSignal::new(false),
            failsafe: Arc::new(Failsafe::new()),
            failsafe_ms,
        }
    }

    pub fn show(&self) {
        self.visible.set(true);
        let ticket = self.failsafe.arm();
        let failsafe = self.failsafe.clone();
        let visible = self.visible;
        let failsafe_ms = self.failsafe_ms;
        set_timeout(
            move || {
                if failsafe.should_fire(ticket, visible.get_untracked()) {
                    tracing::warn!(failsafe_ms, "spinner timeout reached, hiding spinner");
                    visible.set(false);
                }
            },
            Duration::from_millis(failsafe_ms.into()),
        );
    }

    pub fn hide(&self) {
        self.visible.set(false);
    }
}

/// Mounted into `#spinner`.
#[component]
pub fn SpinnerOverlay() -> impl IntoView {
    let spinner = expect_context::<Spinner>();
    let visible = spinner.visible;

    view! {
        <div class="postwall-spinner flex justify-center items-center" class:hidden=move || !visible.get()>
            <div class="animate-spin rounded-full h-8 w-8 border-t-2 border-red-500 border-solid"></div>
        </div>
    }
}
