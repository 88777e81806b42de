use std::ops::Range;

use crate::api::routes::Route;

/// Number of posts in a group
pub const GROUP_SIZE: usize = 10;

pub fn count_groups(total_posts: usize) -> usize {
    (total_posts + GROUP_SIZE - 1) / GROUP_SIZE
}

/// Position within a post collection, recomputed on every fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    route: Route,
    current_group: usize,
    total_posts: usize,
}

impl PageState {
    /// Requested group is clamped to `1..=max(total_groups, 1)`
    pub fn new(route: Route, requested_group: usize, total_posts: usize) -> Self {
        let last_group = count_groups(total_posts).max(1);
        let current_group = requested_group.clamp(1, last_group);
        Self { route, current_group, total_posts }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current_group(&self) -> usize {
        self.current_group
    }

    pub fn total_groups(&self) -> usize {
        count_groups(self.total_posts)
    }

    pub fn window(&self) -> Range<usize> {
        let start = (self.current_group - 1) * GROUP_SIZE;
        let end = (start + GROUP_SIZE).min(self.total_posts);
        start.min(end)..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let window = self.window();
        let end = window.end.min(items.len());
        &items[window.start.min(end)..end]
    }

    pub fn previous_group(&self) -> Option<usize> {
        if self.current_group > 1 {
            Some(self.current_group - 1)
        } else {
            None
        }
    }

    pub fn next_group(&self) -> Option<usize> {
        if self.current_group < self.total_groups() {
            Some(self.current_group + 1)
        } else {
            None
        }
    }
}
