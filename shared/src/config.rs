/// Client settings. Every field has a working default; the page may override
/// any of them through `<meta>` tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    pub profile_cache_max_age_ms: u64,
    pub alert_duration_ms: u32,
    pub spinner_failsafe_ms: u32,
    pub log_level: String,
}

pub const META_API_BASE: &str = "postwall-api";
pub const META_API_KEY: &str = "postwall-api-key";
pub const META_PAGE_SIZE: &str = "postwall-page-size";
pub const META_CACHE_MAX_AGE: &str = "postwall-cache-max-age";
pub const META_LOG_LEVEL: &str = "postwall-log";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://v2.api.noroff.dev".to_string(),
            api_key: None,
            page_size: 12,
            profile_cache_max_age_ms: 5 * 60 * 1000,
            alert_duration_ms: crate::alert::DEFAULT_ALERT_DURATION_MS,
            spinner_failsafe_ms: 15_000,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Applies overrides from `lookup`, which maps a meta name to its
    /// content. Empty or unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(base) = get(META_API_BASE) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(key) = get(META_API_KEY) {
            config.api_key = Some(key);
        }
        if let Some(size) = get(META_PAGE_SIZE).and_then(|v| v.parse::<u32>().ok()) {
            if size > 0 {
                config.page_size = size;
            }
        }
        if let Some(age) = get(META_CACHE_MAX_AGE).and_then(|v| v.parse::<u64>().ok()) {
            config.profile_cache_max_age_ms = age;
        }
        if let Some(level) = get(META_LOG_LEVEL) {
            config.log_level = level;
        }
        config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_without_overrides() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.page_size, 12);
        assert_eq!(config.spinner_failsafe_ms, 15_000);
    }

    #[test]
    fn overrides_are_applied_and_trimmed() {
        let metas: HashMap<&str, &str> = [
            (META_API_BASE, "http://localhost:3000/ "),
            (META_API_KEY, "abc"),
            (META_PAGE_SIZE, "20"),
            (META_LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|k| metas.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base, "http://localhost:3000");
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.url("/auth/login"), "http://localhost:3000/auth/login");
    }

    #[test]
    fn bad_numbers_keep_defaults() {
        let config = ClientConfig::from_lookup(|k| match k {
            META_PAGE_SIZE => Some("0".into()),
            META_CACHE_MAX_AGE => Some("soon".into()),
            META_API_KEY => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config.page_size, 12);
        assert_eq!(config.profile_cache_max_age_ms, 300_000);
        assert_eq!(config.api_key, None);
    }
}
