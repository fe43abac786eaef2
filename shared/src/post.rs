use chrono::DateTime;

use crate::{Media, PostDraft, Reaction};

/// The only reaction the single post view offers.
pub const LIKE_SYMBOL: &str = "👍";
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";
pub const DEFAULT_AVATAR: &str = "/images/default-avatar.png";

/// Splits a comma separated tag list, trimming entries and dropping empty ones.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl PostDraft {
    /// Builds the create/update payload from raw form input. Media is only
    /// attached when an image URL was entered.
    pub fn from_inputs(
        title: &str,
        content: &str,
        image_url: &str,
        image_alt: &str,
        tags_input: &str,
    ) -> Self {
        let image_url = image_url.trim();
        let image_alt = image_alt.trim();
        Self {
            title: title.trim().to_string(),
            body: content.trim().to_string(),
            media: (!image_url.is_empty()).then(|| Media {
                url: image_url.to_string(),
                alt: Some(image_alt.to_string()),
            }),
            tags: parse_tags(tags_input),
        }
    }
}

pub fn total_reactions(reactions: &[Reaction]) -> i64 {
    reactions.iter().map(|r| r.count).sum()
}

pub fn likes_label(total: i64) -> String {
    format!("{} Likes", total)
}

pub fn tags_label(tags: &[String]) -> String {
    if tags.is_empty() {
        "No tags".to_string()
    } else {
        tags.join(", ")
    }
}

pub fn is_valid_image_url(url: &str) -> bool {
    url::Url::parse(url).is_ok()
}

/// Image source for a feed card, falling back to the placeholder.
pub fn card_image(media: Option<&Media>) -> String {
    media
        .map(|m| m.url.as_str())
        .filter(|u| is_valid_image_url(u))
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

/// DOM id of a rendered post; delete removes the node carrying it.
pub fn post_dom_id(id: i64) -> String {
    format!("post-{}", id)
}

/// Renders an API timestamp as e.g. `May 1, 2024 10:00`. Unparseable input is
/// shown as is.
pub fn display_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn display_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// The post behind the edit form. Only a post that loaded may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Missing,
    Loading(i64),
    Loaded(i64),
    Failed(i64),
}

impl EditTarget {
    /// Reads the `id` query parameter.
    pub fn from_query(id: Option<&str>) -> Self {
        id.and_then(|v| v.trim().parse().ok())
            .map_or(EditTarget::Missing, EditTarget::Loading)
    }

    pub fn id(self) -> Option<i64> {
        match self {
            EditTarget::Missing => None,
            EditTarget::Loading(id) | EditTarget::Loaded(id) | EditTarget::Failed(id) => Some(id),
        }
    }

    pub fn loaded(self) -> Self {
        self.id().map_or(EditTarget::Missing, EditTarget::Loaded)
    }

    pub fn failed(self) -> Self {
        self.id().map_or(EditTarget::Missing, EditTarget::Failed)
    }

    pub fn submittable(self) -> Option<i64> {
        match self {
            EditTarget::Loaded(id) => Some(id),
            _ => None,
        }
    }
}
