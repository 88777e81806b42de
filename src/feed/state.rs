use crate::api::{
    routes::Route,
    types::{Post, PostId},
};
use super::pagination::PageState;

/// Sequence number of a post load
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    route: Route,
    group: usize,
}

/// Loaded post collection. Only the response to the latest issued
/// ticket is accepted.
#[derive(Default)]
pub struct FeedState {
    issued: u64,
    page: Option<PageState>,
    posts: Vec<Post>,
}

impl FeedState {
    pub fn begin_load(&mut self, route: Route, group: usize) -> LoadTicket {
        self.issued += 1;
        LoadTicket { seq: self.issued, route, group }
    }

    /// Returns false if response is stale and was discarded
    pub fn complete_load(&mut self, ticket: LoadTicket, posts: Vec<Post>) -> bool {
        if ticket.seq != self.issued {
            return false;
        };
        self.page = Some(PageState::new(ticket.route, ticket.group, posts.len()));
        self.posts = posts;
        true
    }

    pub fn page(&self) -> Option<&PageState> {
        self.page.as_ref()
    }

    pub fn current_group(&self) -> usize {
        self.page.as_ref().map_or(1, |page| page.current_group())
    }

    pub fn visible_posts(&self) -> &[Post] {
        match self.page {
            Some(ref page) => page.slice(&self.posts),
            None => &[],
        }
    }

    pub fn find_post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub fn find_visible_post(&self, post_id: PostId) -> Option<&Post> {
        self.visible_posts().iter().find(|post| post.id == post_id)
    }
}
