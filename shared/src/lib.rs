use serde::{Deserialize, Serialize};

pub mod alert;
pub mod config;
pub mod error;
pub mod follow;
pub mod form;
pub mod pagination;
pub mod post;
pub mod query;
pub mod session;
pub mod spinner;
pub mod theme;

pub use error::ApiError;

// ── Envelope ──

/// Every remote response wraps its payload as `{ "data": ..., "meta": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default, alias = "pageCount")]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub is_first_page: Option<bool>,
    #[serde(default)]
    pub is_last_page: Option<bool>,
}

// ── Auth ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub avatar: Option<Media>,
}

// ── Media ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

// ── Profiles ──

/// Profile as it appears nested inside posts and follower lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCounts {
    #[serde(default)]
    pub posts: i64,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub following: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(default)]
    pub followers: Vec<ProfileSummary>,
    #[serde(default)]
    pub following: Vec<ProfileSummary>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(rename = "_count", default)]
    pub count: ProfileCounts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
}

impl ProfileUpdate {
    /// Builds an update from raw form input. Blank fields are left out so the
    /// remote side keeps its current value.
    pub fn from_inputs(name: &str, avatar_url: &str, bio: &str) -> Self {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            name: non_blank(name),
            bio: non_blank(bio),
            avatar: non_blank(avatar_url).map(|url| Media { url, alt: None }),
        }
    }
}

// ── Posts ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PostCounts {
    #[serde(default)]
    pub comments: i64,
    #[serde(default)]
    pub reactions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub author: Option<ProfileSummary>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(rename = "_count", default)]
    pub count: PostCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    pub tags: Vec<String>,
}

// ── Comments ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub body: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub post_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDraft {
    pub body: String,
}

// ── Reactions ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub symbol: String,
    pub count: i64,
    #[serde(default)]
    pub reactors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionUpdate {
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_list_envelope_decodes_with_meta() {
        let raw = r#"{
            "data": [{
                "id": 7,
                "title": "Hi",
                "body": "Body",
                "tags": ["a"],
                "media": {"url": "https://img.example/x.png", "alt": ""},
                "created": "2024-05-01T10:00:00.000Z",
                "_count": {"comments": 2, "reactions": 3}
            }],
            "meta": {"currentPage": 1, "pageCount": 4, "totalCount": 40}
        }"#;
        let env: Envelope<Vec<Post>> = serde_json::from_str(raw).unwrap();
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.data[0].count.reactions, 3);
        let meta = env.meta.unwrap();
        assert_eq!(meta.total_pages, Some(4));
        assert_eq!(meta.total_count, Some(40));
    }

    #[test]
    fn profile_decodes_counts_and_followers() {
        let raw = r#"{
            "name": "alice",
            "bio": null,
            "followers": [{"name": "bob"}],
            "_count": {"posts": 1, "followers": 1, "following": 0}
        }"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.followers[0].name, "bob");
        assert_eq!(profile.count.followers, 1);
        assert!(profile.posts.is_empty());
    }

    #[test]
    fn login_data_reads_access_token() {
        let raw = r#"{"name": "alice", "email": "a@x.no", "accessToken": "tok"}"#;
        let data: LoginData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.access_token, "tok");
    }

    #[test]
    fn profile_update_skips_blank_fields() {
        let update = ProfileUpdate::from_inputs("  ", "https://a.example/me.png", "");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"avatar": {"url": "https://a.example/me.png"}})
        );
    }
}
