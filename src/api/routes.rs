use std::fmt;

use url::{ParseError, Url};

use crate::errors::ApiError;
use super::types::PostId;

/// Post collection served by the API
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    AllPosts,
    UserPosts(String),
    FollowingPosts(String),
}

impl Route {
    fn segments(&self) -> Vec<&str> {
        match self {
            Self::AllPosts => vec!["posts"],
            Self::UserPosts(username) => vec!["posts", username.as_str()],
            Self::FollowingPosts(username) => {
                vec!["posts", username.as_str(), "following"]
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "/{}", self.segments().join("/"))
    }
}

fn endpoint_url(server_url: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = server_url.clone();
    url.path_segments_mut()
        .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub fn posts_url(server_url: &Url, route: &Route) -> Result<Url, ApiError> {
    endpoint_url(server_url, &route.segments())
}

pub fn new_post_url(server_url: &Url) -> Result<Url, ApiError> {
    endpoint_url(server_url, &["posts"])
}

pub fn update_post_url(server_url: &Url, post_id: PostId) -> Result<Url, ApiError> {
    let post_id = post_id.to_string();
    endpoint_url(server_url, &["posts", post_id.as_str(), "update"])
}

pub fn user_url(server_url: &Url, username: &str) -> Result<Url, ApiError> {
    endpoint_url(server_url, &[username])
}
