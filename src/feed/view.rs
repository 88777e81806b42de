use std::fmt;

use crate::api::{routes::Route, types::PostId};

/// Page sections, exactly one is visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    AllPosts,
    Profile,
    Following,
}

impl Section {
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::AllPosts => "all-posts-page",
            Self::Profile => "profile-page",
            Self::Following => "following-page",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::AllPosts => "All Posts",
            Self::Profile => "Profile",
            Self::Following => "Following",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    AllPosts,
    Profile(String),
    Following(String),
}

impl ViewState {
    pub fn route(&self) -> Route {
        match self {
            Self::AllPosts => Route::AllPosts,
            Self::Profile(username) => Route::UserPosts(username.clone()),
            Self::Following(username) => Route::FollowingPosts(username.clone()),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Self::AllPosts => Section::AllPosts,
            Self::Profile(_) => Section::Profile,
            Self::Following(_) => Section::Following,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowLabel {
    Follow,
    Unfollow,
}

impl FollowLabel {
    pub fn for_relation(is_following: bool) -> Self {
        if is_following { Self::Unfollow } else { Self::Follow }
    }

    /// Returns true if clicking the button should follow
    pub fn intent(&self) -> bool {
        matches!(self, Self::Follow)
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Follow => Self::Unfollow,
            Self::Unfollow => Self::Follow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
        }
    }
}

/// User intent attached to rendered elements
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ShowAllPosts,
    ShowProfile(String),
    ShowFollowing,
    GoToGroup(usize),
    SubmitPost(String),
    EditPost(PostId),
    SavePost { post_id: PostId, content: String },
    CancelEdit,
    ToggleFollow(String),
}

impl fmt::Display for Action {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowAllPosts => write!(formatter, "all"),
            Self::ShowProfile(username) => write!(formatter, "profile {}", username),
            Self::ShowFollowing => write!(formatter, "following"),
            Self::GoToGroup(group) => write!(formatter, "page {}", group),
            Self::SubmitPost(_) => write!(formatter, "post"),
            Self::EditPost(post_id) => write!(formatter, "edit {}", post_id),
            Self::SavePost { .. } => write!(formatter, "save"),
            Self::CancelEdit => write!(formatter, "cancel"),
            Self::ToggleFollow(_) => write!(formatter, "follow"),
        }
    }
}
