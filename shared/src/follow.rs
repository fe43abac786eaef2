use crate::ProfileSummary;

/// Follow state for one profile page: button label, follower count and the
/// follower list behind the count.
///
/// The count and the list only move when a remote toggle succeeds; a failed
/// toggle leaves label, count and list where they were.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowToggle {
    following: bool,
    followers: i64,
    list: Vec<ProfileSummary>,
    viewer: Option<String>,
    in_flight: bool,
}

impl FollowToggle {
    pub fn new(following: bool, followers: i64) -> Self {
        Self {
            following,
            followers,
            list: Vec::new(),
            viewer: None,
            in_flight: false,
        }
    }

    /// Seeds the state from the fetched follower list.
    pub fn seed(viewer: Option<&str>, followers: &[ProfileSummary], follower_count: i64) -> Self {
        let following = viewer
            .map(|name| followers.iter().any(|f| f.name == name))
            .unwrap_or(false);
        Self {
            list: followers.to_vec(),
            viewer: viewer.map(str::to_string),
            ..Self::new(following, follower_count)
        }
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn follower_count(&self) -> i64 {
        self.followers
    }

    pub fn followers(&self) -> &[ProfileSummary] {
        &self.list
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn label(&self) -> &'static str {
        match (self.in_flight, self.following) {
            (true, true) => "Unfollowing...",
            (true, false) => "Following...",
            (false, true) => "Unfollow",
            (false, false) => "Follow",
        }
    }

    /// Marks a toggle as started. Returns whether the viewer currently
    /// follows the profile, or `None` while a previous toggle is in flight.
    pub fn begin(&mut self) -> Option<bool> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(self.following)
    }

    /// Adopts the state the remote side reported.
    pub fn complete(&mut self, now_following: bool) {
        self.in_flight = false;
        if now_following == self.following {
            return;
        }
        self.following = now_following;
        self.followers += if now_following { 1 } else { -1 };
        if let Some(viewer) = &self.viewer {
            if now_following {
                self.list.push(ProfileSummary {
                    name: viewer.clone(),
                    email: None,
                    bio: None,
                    avatar: None,
                });
            } else {
                self.list.retain(|f| &f.name != viewer);
            }
        }
    }

    pub fn fail(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str) -> ProfileSummary {
        ProfileSummary {
            name: name.to_string(),
            email: None,
            bio: None,
            avatar: None,
        }
    }

    #[test]
    fn seeded_from_follower_list() {
        let followers = vec![summary("bob"), summary("carol")];
        assert!(FollowToggle::seed(Some("carol"), &followers, 2).is_following());
        assert!(!FollowToggle::seed(Some("dave"), &followers, 2).is_following());
        assert!(!FollowToggle::seed(None, &followers, 2).is_following());
    }

    #[test]
    fn follow_increments_count() {
        let mut toggle = FollowToggle::new(false, 4);
        assert_eq!(toggle.begin(), Some(false));
        assert_eq!(toggle.label(), "Following...");
        assert!(toggle.is_busy());
        toggle.complete(true);
        assert_eq!(toggle.follower_count(), 5);
        assert_eq!(toggle.label(), "Unfollow");
    }

    #[test]
    fn unfollow_decrements_count() {
        let mut toggle = FollowToggle::new(true, 4);
        assert_eq!(toggle.begin(), Some(true));
        assert_eq!(toggle.label(), "Unfollowing...");
        toggle.complete(false);
        assert_eq!(toggle.follower_count(), 3);
        assert_eq!(toggle.label(), "Follow");
    }

    #[test]
    fn failure_reverts_label_and_keeps_count() {
        let mut toggle = FollowToggle::new(false, 4);
        let before = toggle.label();
        toggle.begin();
        toggle.fail();
        assert_eq!(toggle.label(), before);
        assert_eq!(toggle.follower_count(), 4);
        assert!(!toggle.is_busy());
    }

    #[test]
    fn second_click_while_busy_is_ignored() {
        let mut toggle = FollowToggle::new(false, 0);
        assert!(toggle.begin().is_some());
        assert_eq!(toggle.begin(), None);
    }

    #[test]
    fn unchanged_server_state_leaves_count() {
        let mut toggle = FollowToggle::new(true, 2);
        toggle.begin();
        toggle.complete(true);
        assert_eq!(toggle.follower_count(), 2);
    }

    #[test]
    fn follower_list_tracks_the_count() {
        let followers = vec![summary("bob")];
        let mut toggle = FollowToggle::seed(Some("alice"), &followers, 1);

        toggle.begin();
        toggle.complete(true);
        assert_eq!(toggle.follower_count(), 2);
        let names: Vec<_> = toggle.followers().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);

        toggle.begin();
        toggle.complete(false);
        assert_eq!(toggle.follower_count(), 1);
        assert_eq!(toggle.followers(), &followers[..]);
    }

    #[test]
    fn failed_toggle_keeps_follower_list() {
        let followers = vec![summary("bob")];
        let mut toggle = FollowToggle::seed(Some("alice"), &followers, 1);
        toggle.begin();
        toggle.fail();
        assert_eq!(toggle.followers(), &followers[..]);
        assert_eq!(toggle.follower_count(), 1);
    }
}
