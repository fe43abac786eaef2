//! Session context and the per-user profile cache.
//!
//! Everything persistent goes through [`KeyValueStore`], so the browser
//! build plugs in `localStorage` and tests use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::Profile;

pub const USERNAME_KEY: &str = "username";
pub const TOKEN_KEY: &str = "token";
pub const THEME_KEY: &str = "theme";
const PROFILE_CACHE_PREFIX: &str = "profileData:";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

#[derive(Serialize, Deserialize)]
struct CachedProfile {
    stored_at_ms: u64,
    profile: Profile,
}

fn profile_key(username: &str) -> String {
    format!("{}{}", PROFILE_CACHE_PREFIX, username)
}

/// Session accessor plus profile cache over a key-value store.
#[derive(Debug, Clone)]
pub struct SessionContext<S> {
    store: S,
    cache_max_age_ms: u64,
}

impl<S: KeyValueStore> SessionContext<S> {
    pub fn new(store: S, cache_max_age_ms: u64) -> Self {
        Self {
            store,
            cache_max_age_ms,
        }
    }

    /// Both username and token must be present.
    pub fn load(&self) -> Option<Session> {
        let username = self.store.get(USERNAME_KEY).filter(|v| !v.is_empty())?;
        let token = self.store.get(TOKEN_KEY).filter(|v| !v.is_empty())?;
        Some(Session { username, token })
    }

    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY).filter(|v| !v.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|v| !v.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn save(&self, session: &Session) {
        self.store.set(USERNAME_KEY, &session.username);
        self.store.set(TOKEN_KEY, &session.token);
    }

    /// Overwrites whichever of name and token is given. A rename also drops
    /// the cache entry kept under the old name.
    pub fn update_user_info(&self, name: Option<&str>, token: Option<&str>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            if let Some(old) = self.username().filter(|old| old != name) {
                self.invalidate_profile(&old);
            }
            self.store.set(USERNAME_KEY, name);
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.store.set(TOKEN_KEY, token);
        }
    }

    /// Logs out: removes the credentials and the user's cached profile.
    pub fn clear(&self) {
        if let Some(name) = self.username() {
            self.invalidate_profile(&name);
        }
        self.store.remove(USERNAME_KEY);
        self.store.remove(TOKEN_KEY);
    }

    /// Returns the cached profile for `username` if it is fresh and really
    /// belongs to that user.
    pub fn cached_profile(&self, username: &str, now_ms: u64) -> Option<Profile> {
        let raw = self.store.get(&profile_key(username))?;
        let cached: CachedProfile = match serde_json::from_str(&raw) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(%username, error = %e, "dropping unreadable profile cache entry");
                self.invalidate_profile(username);
                return None;
            }
        };
        let age = now_ms.saturating_sub(cached.stored_at_ms);
        if age > self.cache_max_age_ms || cached.profile.name != username {
            tracing::debug!(%username, age, "profile cache entry is stale");
            return None;
        }
        Some(cached.profile)
    }

    pub fn cache_profile(&self, profile: &Profile, now_ms: u64) {
        let entry = CachedProfile {
            stored_at_ms: now_ms,
            profile: profile.clone(),
        };
        match serde_json::to_string(&entry) {
            Ok(raw) => self.store.set(&profile_key(&profile.name), &raw),
            Err(e) => tracing::warn!(error = %e, "could not serialize profile for cache"),
        }
    }

    pub fn invalidate_profile(&self, username: &str) {
        self.store.remove(&profile_key(username));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProfileCounts;

    const MAX_AGE: u64 = 60_000;

    fn profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            email: None,
            bio: Some("hi".into()),
            avatar: None,
            banner: None,
            followers: vec![],
            following: vec![],
            posts: vec![],
            count: ProfileCounts::default(),
        }
    }

    fn context() -> SessionContext<MemoryStore> {
        SessionContext::new(MemoryStore::new(), MAX_AGE)
    }

    #[test]
    fn load_requires_both_fields() {
        let ctx = context();
        assert_eq!(ctx.load(), None);
        ctx.store.set(USERNAME_KEY, "alice");
        assert_eq!(ctx.load(), None);
        ctx.store.set(TOKEN_KEY, "tok");
        assert_eq!(
            ctx.load(),
            Some(Session { username: "alice".into(), token: "tok".into() })
        );
        assert!(ctx.is_logged_in());
    }

    #[test]
    fn clear_removes_credentials_and_cache() {
        let ctx = context();
        ctx.save(&Session { username: "alice".into(), token: "tok".into() });
        ctx.cache_profile(&profile("alice"), 0);
        ctx.store.set(THEME_KEY, "dark");
        ctx.clear();
        assert_eq!(ctx.load(), None);
        assert_eq!(ctx.cached_profile("alice", 0), None);
        assert_eq!(ctx.store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn cache_is_keyed_by_username() {
        let ctx = context();
        ctx.cache_profile(&profile("alice"), 1_000);
        assert!(ctx.cached_profile("alice", 2_000).is_some());
        assert_eq!(ctx.cached_profile("bob", 2_000), None);
    }

    #[test]
    fn stale_entries_are_ignored() {
        let ctx = context();
        ctx.cache_profile(&profile("alice"), 1_000);
        assert!(ctx.cached_profile("alice", 1_000 + MAX_AGE).is_some());
        assert_eq!(ctx.cached_profile("alice", 1_001 + MAX_AGE), None);
    }

    #[test]
    fn entry_for_another_owner_is_rejected() {
        let ctx = context();
        let raw = serde_json::to_string(&CachedProfile {
            stored_at_ms: 0,
            profile: profile("mallory"),
        })
        .unwrap();
        ctx.store.set(&profile_key("alice"), &raw);
        assert_eq!(ctx.cached_profile("alice", 0), None);
    }

    #[test]
    fn garbage_entry_is_dropped() {
        let ctx = context();
        ctx.store.set(&profile_key("alice"), "{not json");
        assert_eq!(ctx.cached_profile("alice", 0), None);
        assert_eq!(ctx.store.get(&profile_key("alice")), None);
    }

    #[test]
    fn rename_moves_session_and_drops_old_cache() {
        let ctx = context();
        ctx.save(&Session { username: "alice".into(), token: "tok".into() });
        ctx.cache_profile(&profile("alice"), 0);
        ctx.update_user_info(Some("alicia"), None);
        assert_eq!(ctx.username().as_deref(), Some("alicia"));
        assert_eq!(ctx.token().as_deref(), Some("tok"));
        assert_eq!(ctx.cached_profile("alice", 0), None);
    }
}
