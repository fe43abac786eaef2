use postwall_shared::session::KeyValueStore;
use web_sys::{window, Storage};

/// `localStorage`. Reads return `None` and writes are dropped when storage is
/// unavailable (private mode, disabled cookies).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok()).flatten()
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(%key, "localStorage write failed");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
