//! Remote endpoint paths.

use urlencoding::encode;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
const POSTS_PATH: &str = "/social/posts";
const PROFILES_PATH: &str = "/social/profiles";

pub const DEFAULT_SORT_FIELD: &str = "created";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// Related data to embed in a post response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Include {
    pub author: bool,
    pub comments: bool,
    pub reactions: bool,
}

impl Include {
    pub fn all() -> Self {
        Self {
            author: true,
            comments: true,
            reactions: true,
        }
    }

    fn push_params(&self, params: &mut Vec<String>) {
        if self.author {
            params.push("_author=true".into());
        }
        if self.comments {
            params.push("_comments=true".into());
        }
        if self.reactions {
            params.push("_reactions=true".into());
        }
    }
}

/// One page of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub limit: u32,
    pub page: u32,
    pub query: String,
    pub sort: String,
    pub sort_order: SortOrder,
    pub include: Include,
}

impl PostQuery {
    pub fn new(limit: u32, page: u32) -> Self {
        Self {
            limit,
            page,
            query: String::new(),
            sort: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::default(),
            include: Include::default(),
        }
    }

    /// A non-empty query goes to the search endpoint.
    pub fn path(&self) -> String {
        let q = self.query.trim();
        let mut params = Vec::new();
        let base = if q.is_empty() {
            POSTS_PATH.to_string()
        } else {
            params.push(format!("q={}", encode(q)));
            format!("{}/search", POSTS_PATH)
        };
        params.push(format!("limit={}", self.limit));
        params.push(format!("page={}", self.page.max(1)));
        params.push(format!("sort={}", encode(&self.sort)));
        params.push(format!("sortOrder={}", self.sort_order.as_str()));
        self.include.push_params(&mut params);
        format!("{}?{}", base, params.join("&"))
    }
}

fn with_params(path: String, params: Vec<String>) -> String {
    if params.is_empty() {
        path
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

pub fn posts_path() -> String {
    POSTS_PATH.to_string()
}

pub fn post_path(id: i64, include: Include) -> String {
    let mut params = Vec::new();
    include.push_params(&mut params);
    with_params(format!("{}/{}", POSTS_PATH, id), params)
}

pub fn comment_path(post_id: i64) -> String {
    format!("{}/{}/comment", POSTS_PATH, post_id)
}

pub fn react_path(post_id: i64, symbol: &str) -> String {
    format!("{}/{}/react/{}", POSTS_PATH, post_id, encode(symbol))
}

/// Profile with posts and both follow lists embedded.
pub fn profile_path(name: &str) -> String {
    format!(
        "{}/{}?_posts=true&_followers=true&_following=true",
        PROFILES_PATH,
        encode(name)
    )
}

pub fn profile_update_path(name: &str) -> String {
    format!("{}/{}", PROFILES_PATH, encode(name))
}

/// Unfollows when the viewer currently follows, follows otherwise.
pub fn follow_path(name: &str, currently_following: bool) -> String {
    let action = if currently_following { "unfollow" } else { "follow" };
    format!("{}/{}/{}", PROFILES_PATH, encode(name), action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_page_path() {
        let q = PostQuery {
            include: Include { author: true, ..Include::default() },
            ..PostQuery::new(12, 2)
        };
        assert_eq!(
            q.path(),
            "/social/posts?limit=12&page=2&sort=created&sortOrder=desc&_author=true"
        );
    }

    #[test]
    fn search_path_encodes_query() {
        let q = PostQuery {
            query: " hello world ".into(),
            sort_order: SortOrder::Asc,
            ..PostQuery::new(12, 1)
        };
        assert_eq!(
            q.path(),
            "/social/posts/search?q=hello%20world&limit=12&page=1&sort=created&sortOrder=asc"
        );
    }

    #[test]
    fn single_post_path_embeds_everything() {
        assert_eq!(
            post_path(5, Include::all()),
            "/social/posts/5?_author=true&_comments=true&_reactions=true"
        );
        assert_eq!(post_path(5, Include::default()), "/social/posts/5");
    }

    #[test]
    fn follow_path_picks_action() {
        assert_eq!(follow_path("bob", false), "/social/profiles/bob/follow");
        assert_eq!(follow_path("bob", true), "/social/profiles/bob/unfollow");
    }

    #[test]
    fn react_path_encodes_symbol() {
        assert_eq!(react_path(1, LIKE), "/social/posts/1/react/%F0%9F%91%8D");
    }

    const LIKE: &str = crate::post::LIKE_SYMBOL;

    #[test]
    fn sort_order_parse() {
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("whatever"), SortOrder::Desc);
    }
}
