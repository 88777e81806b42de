use serde::{Deserialize, Serialize};

pub type PostId = u64;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub poster: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub following: Vec<String>,
}

impl UserRecord {
    pub fn has_follower(&self, username: &str) -> bool {
        self.followers.iter().any(|follower| follower == username)
    }
}

#[derive(Serialize)]
pub struct PostData<'a> {
    pub content: &'a str,
}

#[derive(Serialize)]
pub struct FollowData<'a> {
    pub follow: bool,
    pub user: &'a str,
}

/// Reply to post creation or update
#[derive(Debug, Default, Deserialize)]
pub struct ServerReply {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ServerReply {
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}
