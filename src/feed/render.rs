use std::collections::BTreeMap;

use network_config::Session;
use network_utils::html::{escape_attribute, escape_html};

use crate::api::types::{Post, PostId};
use super::pagination::PageState;
use super::state::FeedState;
use super::view::{Action, FollowLabel, Section, ViewState};

/// Element containers with fixed identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    UsernameContainer,
    FollowButton,
    FollowCounts,
    NewPostForm,
    Posts,
    Pagination,
}

impl Region {
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::UsernameContainer => "username-container",
            Self::FollowButton => "follow-or-unfollow-container",
            Self::FollowCounts => "followers-and-following-container",
            Self::NewPostForm => "new-post-container",
            Self::Posts => "posts",
            Self::Pagination => "pagination-container",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub class: Option<&'static str>,
    pub text: Option<String>,
    pub disabled: bool,
    pub active: bool,
    pub action: Option<Action>,
    pub children: Vec<Element>,
}

const INLINE_TAGS: [&str; 4] = ["a", "button", "li", "span"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            class: None,
            text: None,
            disabled: false,
            active: false,
            action: None,
            children: vec![],
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.disabled = value;
        self
    }

    pub fn active(mut self, value: bool) -> Self {
        self.active = value;
        self
    }

    /// Depth-first search
    pub fn find(&self, predicate: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        };
        self.children.iter().find_map(|child| child.find(predicate))
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag);
        if let Some(ref id) = self.id {
            html += &format!(r#" id="{}""#, escape_attribute(id));
        };
        let mut classes: Vec<&str> = self.class.into_iter().collect();
        if self.active {
            classes.push("active");
        };
        if self.disabled {
            classes.push("disabled");
        };
        if !classes.is_empty() {
            html += &format!(r#" class="{}""#, classes.join(" "));
        };
        if self.disabled {
            html += " disabled";
        };
        if let Some(ref action) = self.action {
            html += &format!(
                r#" data-action="{}""#,
                escape_attribute(&action.to_string()),
            );
        };
        html += ">";
        if let Some(ref text) = self.text {
            html += &escape_html(text);
        };
        for child in self.children.iter() {
            html += &child.to_html();
        };
        html += &format!("</{}>", self.tag);
        html
    }

    fn label(&self, disabled: bool, active: bool) -> String {
        let text = self.text.clone().unwrap_or_default();
        match self.tag {
            "a" => format!("@{}", text),
            "button" if disabled => format!("({})", text),
            "button" if active => format!("[*{}*]", text),
            "button" => format!("[{}]", text),
            "h1" => format!("== {} ==", text),
            "textarea" => format!("> {}", text),
            _ => text,
        }
    }

    fn inline_text(&self, disabled: bool, active: bool) -> String {
        let disabled = disabled || self.disabled;
        let active = active || self.active;
        if self.children.is_empty() {
            return self.label(disabled, active);
        };
        self.children.iter()
            .map(|child| child.inline_text(disabled, active))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn write_text(&self, indent: usize, lines: &mut Vec<String>) {
        let prefix = " ".repeat(indent);
        if self.children.is_empty() || self.tag == "ul" {
            let line = self.inline_text(false, false);
            if !line.is_empty() {
                lines.push(format!("{}{}", prefix, line));
            };
            return;
        };
        if let Some(ref text) = self.text {
            lines.push(format!("{}{}", prefix, text));
        };
        let mut inline_parts = vec![];
        for child in self.children.iter() {
            if INLINE_TAGS.contains(&child.tag) {
                inline_parts.push(child.inline_text(false, false));
                continue;
            };
            if !inline_parts.is_empty() {
                lines.push(format!("{}{}", prefix, inline_parts.join(" ")));
                inline_parts.clear();
            };
            child.write_text(indent + 2, lines);
        };
        if !inline_parts.is_empty() {
            lines.push(format!("{}{}", prefix, inline_parts.join(" ")));
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub section: Option<Section>,
    pub regions: BTreeMap<Region, Vec<Element>>,
}

impl Page {
    pub fn region(&self, region: Region) -> &[Element] {
        self.regions.get(&region)
            .map(|elements| elements.as_slice())
            .unwrap_or(&[])
    }

    pub fn find(&self, predicate: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.regions.values()
            .flatten()
            .find_map(|element| element.find(&predicate))
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![];
        if let Some(section) = self.section {
            lines.push(format!("# {}", section.title()));
        };
        for elements in self.regions.values() {
            for element in elements {
                element.write_text(0, &mut lines);
            };
        };
        lines.join("\n")
    }
}

pub fn region_html(region: Region, elements: &[Element]) -> String {
    let inner: String = elements.iter()
        .map(|element| element.to_html())
        .collect();
    format!(r#"<div id="{}">{}</div>"#, region.element_id(), inner)
}

/// Data of the profile section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileData {
    pub username: String,
    pub follower_count: Option<usize>,
    pub following_count: Option<usize>,
    // Absent on own profile and for anonymous viewers
    pub follow_label: Option<FollowLabel>,
}

impl ProfileData {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            follower_count: None,
            following_count: None,
            follow_label: None,
        }
    }
}

/// Inline edit form replacing a post
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditForm {
    pub post_id: PostId,
    pub draft: String,
}

pub struct ViewData<'a> {
    pub feed: &'a FeedState,
    pub profile: Option<&'a ProfileData>,
    pub editing: Option<&'a EditForm>,
    pub new_post_draft: &'a str,
}

fn render_post(post: &Post, session: &Session) -> Element {
    let mut children = vec![
        Element::new("a")
            .with_class("post-poster")
            .with_text(post.poster.clone())
            .with_action(Action::ShowProfile(post.poster.clone())),
        Element::new("p")
            .with_class("post-content")
            .with_text(post.content.clone()),
        Element::new("p")
            .with_class("post-timestamp")
            .with_text(post.timestamp.clone()),
    ];
    if session.is_current_user(&post.poster) {
        children.push(
            Element::new("button")
                .with_class("edit-post-button")
                .with_text("edit")
                .with_action(Action::EditPost(post.id)),
        );
    };
    Element::new("div")
        .with_id(format!("post-{}", post.id))
        .with_class("post-container")
        .with_children(children)
}

fn render_edit_form(form: &EditForm) -> Element {
    let edit_form = Element::new("form")
        .with_class("edit-post-form")
        .with_children(vec![
            Element::new("textarea")
                .with_class("edit-post-content")
                .with_text(form.draft.clone()),
            Element::new("button")
                .with_class("save-post-button")
                .with_text("save")
                .with_action(Action::SavePost {
                    post_id: form.post_id,
                    content: form.draft.clone(),
                }),
            Element::new("button")
                .with_class("cancel-edit-button")
                .with_text("cancel")
                .with_action(Action::CancelEdit),
        ]);
    Element::new("div")
        .with_id(format!("post-{}", form.post_id))
        .with_class("post-container")
        .with_children(vec![edit_form])
}

/// Returns None for empty collections
pub fn render_navigation(page: &PageState) -> Option<Element> {
    let total_groups = page.total_groups();
    if total_groups == 0 {
        return None;
    };
    let current_group = page.current_group();
    let mut items = vec![];
    let previous = Element::new("button")
        .with_class("page-link")
        .with_text("previous");
    let previous = match page.previous_group() {
        Some(group) => previous.with_action(Action::GoToGroup(group)),
        None => previous,
    };
    items.push(
        Element::new("li")
            .with_class("page-item")
            .disabled(page.previous_group().is_none())
            .with_children(vec![previous]),
    );
    for group in 1..=total_groups {
        let link = Element::new("button")
            .with_class("page-link")
            .with_text(group.to_string())
            .with_action(Action::GoToGroup(group));
        items.push(
            Element::new("li")
                .with_class("page-item")
                .active(group == current_group)
                .with_children(vec![link]),
        );
    };
    let next = Element::new("button")
        .with_class("page-link")
        .with_text("next");
    let next = match page.next_group() {
        Some(group) => next.with_action(Action::GoToGroup(group)),
        None => next,
    };
    items.push(
        Element::new("li")
            .with_class("page-item")
            .disabled(page.next_group().is_none())
            .with_children(vec![next]),
    );
    let navigation = Element::new("nav")
        .with_id("pagination")
        .with_children(vec![
            Element::new("ul")
                .with_class("pagination")
                .with_children(items),
        ]);
    Some(navigation)
}

fn render_follow_counts(profile: &ProfileData) -> Vec<Element> {
    let counts = [
        ("followers", profile.follower_count),
        ("following", profile.following_count),
    ];
    counts.into_iter()
        .filter_map(|(header, maybe_count)| {
            let count = maybe_count?;
            let container = Element::new("div")
                .with_id(format!("{}-container", header))
                .with_children(vec![
                    Element::new("h5")
                        .with_class("followers-or-following-header")
                        .with_text(header),
                    Element::new("p")
                        .with_class("followers-or-following-count")
                        .with_text(count.to_string()),
                ]);
            Some(container)
        })
        .collect()
}

fn render_profile(
    profile: &ProfileData,
    regions: &mut BTreeMap<Region, Vec<Element>>,
) {
    regions.insert(Region::UsernameContainer, vec![
        Element::new("h1")
            .with_class("section-title")
            .with_text(profile.username.clone()),
    ]);
    let button = profile.follow_label.map(|label| {
        Element::new("button")
            .with_id("follow-or-unfollow-button")
            .with_text(label.as_str())
            .with_action(Action::ToggleFollow(profile.username.clone()))
    });
    regions.insert(Region::FollowButton, button.into_iter().collect());
    regions.insert(Region::FollowCounts, render_follow_counts(profile));
}

fn render_new_post_form(draft: &str) -> Element {
    Element::new("form")
        .with_id("new-post-form")
        .with_children(vec![
            Element::new("textarea")
                .with_id("new-post-content")
                .with_text(draft),
            Element::new("button")
                .with_class("new-post-button")
                .with_text("Post")
                .with_action(Action::SubmitPost(draft.to_string())),
        ])
}

/// Maps view state and loaded data to page model
pub fn render(view: &ViewState, data: &ViewData, session: &Session) -> Page {
    let mut regions = BTreeMap::new();
    match view {
        ViewState::AllPosts => {
            if session.current_user.is_some() {
                regions.insert(
                    Region::NewPostForm,
                    vec![render_new_post_form(data.new_post_draft)],
                );
            };
        },
        ViewState::Profile(username) => {
            if let Some(profile) = data.profile {
                if &profile.username == username {
                    render_profile(profile, &mut regions);
                };
            };
        },
        ViewState::Following(_) => (),
    };
    // Posts may belong to another route while the next load is pending
    let posts: &[Post] = match data.feed.page() {
        Some(page) if page.route() == &view.route() => {
            data.feed.visible_posts()
        },
        _ => &[],
    };
    let post_elements = posts.iter()
        .map(|post| match data.editing {
            Some(form) if form.post_id == post.id => render_edit_form(form),
            _ => render_post(post, session),
        })
        .collect();
    regions.insert(Region::Posts, post_elements);
    let navigation = data.feed.page()
        .filter(|page| page.route() == &view.route())
        .and_then(render_navigation);
    regions.insert(Region::Pagination, navigation.into_iter().collect());
    Page {
        section: Some(view.section()),
        regions,
    }
}
