use network_config::Session;

use crate::api::{
    client::NetworkApi,
    routes::Route,
    types::PostId,
};
use crate::errors::{ClientError, ValidationError};
use super::diff::diff;
use super::presenter::Presenter;
use super::render::{render, EditForm, Page, ProfileData, ViewData};
use super::state::FeedState;
use super::view::{Action, FollowLabel, ViewState};

/// View state replaced by `enter`
struct PriorView {
    view: ViewState,
    profile: Option<ProfileData>,
    editing: Option<EditForm>,
}

/// Drives fetch and render cycles for user actions
pub struct FeedController<A: NetworkApi, P: Presenter> {
    api: A,
    presenter: P,
    session: Session,
    view: ViewState,
    feed: FeedState,
    profile: Option<ProfileData>,
    editing: Option<EditForm>,
    new_post_draft: String,
    page: Page,
}

impl<A: NetworkApi, P: Presenter> FeedController<A, P> {
    pub fn new(api: A, presenter: P, session: Session) -> Self {
        Self {
            api,
            presenter,
            session,
            view: ViewState::AllPosts,
            feed: FeedState::default(),
            profile: None,
            editing: None,
            new_post_draft: String::new(),
            page: Page::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn editing(&self) -> Option<&EditForm> {
        self.editing.as_ref()
    }

    pub fn new_post_draft(&self) -> &str {
        &self.new_post_draft
    }

    fn current_user(&self) -> Result<String, ClientError> {
        self.session.current_user.clone()
            .ok_or_else(ClientError::authentication_required)
    }

    fn refresh(&mut self) -> () {
        let data = ViewData {
            feed: &self.feed,
            profile: self.profile.as_ref(),
            editing: self.editing.as_ref(),
            new_post_draft: &self.new_post_draft,
        };
        let page = render(&self.view, &data, &self.session);
        let patches = diff(&self.page, &page);
        if !patches.is_empty() {
            self.presenter.apply(&page, &patches);
        };
        self.page = page;
    }

    /// Runs action and reports its failure
    pub async fn dispatch(&mut self, action: Action) -> () {
        log::debug!("action: {}", action);
        let result = match action {
            Action::ShowAllPosts => self.show_all_posts().await,
            Action::ShowProfile(username) => self.show_profile(&username).await,
            Action::ShowFollowing => self.show_following().await,
            Action::GoToGroup(group) => self.change_group(group).await,
            Action::SubmitPost(content) => self.submit_post(&content).await,
            Action::EditPost(post_id) => self.edit_post(post_id),
            Action::SavePost { post_id, content } => {
                self.update_post(post_id, &content).await
            },
            Action::CancelEdit => self.cancel_edit().await,
            Action::ToggleFollow(username) => {
                self.follow_or_unfollow(&username).await
            },
        };
        if let Err(error) = result {
            log::warn!("{}", error);
            self.presenter.report(&error);
        };
    }

    /// Loads the whole collection and displays one group of it.
    /// Returns false if response was superseded by a newer load.
    pub async fn load_posts(
        &mut self,
        route: Route,
        group: usize,
    ) -> Result<bool, ClientError> {
        let ticket = self.feed.begin_load(route.clone(), group);
        let posts = self.api.get_posts(&route).await?;
        log::info!("loaded {} posts from {}", posts.len(), route);
        if !self.feed.complete_load(ticket, posts) {
            log::debug!("discarding stale response from {}", route);
            return Ok(false);
        };
        // Rendered posts are replaced, edit form is dropped
        self.editing = None;
        self.refresh();
        Ok(true)
    }

    pub async fn show_all_posts(&mut self) -> Result<(), ClientError> {
        self.switch_view(ViewState::AllPosts).await
    }

    pub async fn show_following(&mut self) -> Result<(), ClientError> {
        let current_user = self.current_user()?;
        self.switch_view(ViewState::Following(current_user)).await
    }

    pub async fn show_profile(&mut self, username: &str) -> Result<(), ClientError> {
        let prior = self.enter(ViewState::Profile(username.to_string()));
        self.profile = Some(ProfileData::new(username));
        self.refresh();
        // Profile data and posts are loaded independently
        let profile_result = self.load_follow_state(username).await;
        let posts_result = self
            .load_posts(Route::UserPosts(username.to_string()), 1)
            .await;
        if posts_result.is_err() {
            self.restore(prior);
        };
        posts_result?;
        profile_result?;
        Ok(())
    }

    /// Enters view and loads its first group.
    /// Prior view is restored if loading fails.
    async fn switch_view(&mut self, view: ViewState) -> Result<(), ClientError> {
        let route = view.route();
        let prior = self.enter(view);
        if let Err(error) = self.load_posts(route, 1).await {
            self.restore(prior);
            return Err(error);
        };
        Ok(())
    }

    fn enter(&mut self, view: ViewState) -> PriorView {
        log::debug!("entering {:?}", view);
        PriorView {
            view: std::mem::replace(&mut self.view, view),
            profile: self.profile.take(),
            editing: self.editing.take(),
        }
    }

    fn restore(&mut self, prior: PriorView) -> () {
        log::debug!("restoring {:?}", prior.view);
        self.view = prior.view;
        self.profile = prior.profile;
        self.editing = prior.editing;
        self.refresh();
    }

    pub async fn change_group(&mut self, group: usize) -> Result<(), ClientError> {
        self.load_posts(self.view.route(), group).await?;
        Ok(())
    }

    /// Updates the new post input
    pub fn set_draft(&mut self, content: &str) -> () {
        self.new_post_draft = content.to_string();
        self.refresh();
    }

    pub async fn submit_post(&mut self, content: &str) -> Result<(), ClientError> {
        self.current_user()?;
        self.new_post_draft = content.to_string();
        let reply = self.api.create_post(content).await?;
        self.presenter.alert(reply.text().unwrap_or_default());
        // Input is cleared once the server replied
        self.new_post_draft.clear();
        self.refresh();
        self.load_posts(self.view.route(), 1).await?;
        Ok(())
    }

    /// Replaces post with inline edit form
    pub fn edit_post(&mut self, post_id: PostId) -> Result<(), ClientError> {
        let post = self.feed.find_visible_post(post_id)
            .ok_or(ValidationError("post not found"))?;
        if !self.session.is_current_user(&post.poster) {
            return Err(ValidationError("only the poster can edit a post").into());
        };
        self.editing = Some(EditForm {
            post_id,
            draft: post.content.clone(),
        });
        self.refresh();
        Ok(())
    }

    /// Updates content of the edit form
    pub fn set_edit_draft(&mut self, content: &str) -> Result<(), ClientError> {
        let form = self.editing.as_mut()
            .ok_or(ValidationError("no post is being edited"))?;
        form.draft = content.to_string();
        self.refresh();
        Ok(())
    }

    pub async fn update_post(
        &mut self,
        post_id: PostId,
        content: &str,
    ) -> Result<(), ClientError> {
        let current_user = self.current_user()?;
        if let Some(post) = self.feed.find_post(post_id) {
            if post.poster != current_user {
                return Err(ValidationError("only the poster can edit a post").into());
            };
        };
        let reply = self.api.update_post(post_id, content).await?;
        self.presenter.alert(reply.text().unwrap_or_default());
        self.load_posts(self.view.route(), 1).await?;
        Ok(())
    }

    pub async fn cancel_edit(&mut self) -> Result<(), ClientError> {
        let group = self.feed.current_group();
        self.load_posts(self.view.route(), group).await?;
        Ok(())
    }

    async fn load_follow_state(&mut self, username: &str) -> Result<(), ClientError> {
        let record = self.api.get_user(username).await?;
        let follow_label = match self.session.current_user {
            Some(ref current_user) if current_user != username => {
                Some(FollowLabel::for_relation(record.has_follower(current_user)))
            },
            // Own profile or anonymous viewer
            _ => None,
        };
        if let Some(profile) = self.profile.as_mut()
            .filter(|profile| profile.username == username)
        {
            profile.follower_count = Some(record.followers.len());
            profile.following_count = Some(record.following.len());
            profile.follow_label = follow_label;
        };
        self.refresh();
        Ok(())
    }

    async fn load_follow_counts(&mut self, username: &str) -> Result<(), ClientError> {
        let record = self.api.get_user(username).await?;
        if let Some(profile) = self.profile.as_mut()
            .filter(|profile| profile.username == username)
        {
            profile.follower_count = Some(record.followers.len());
            profile.following_count = Some(record.following.len());
        };
        self.refresh();
        Ok(())
    }

    /// Intent is taken from the current button label
    pub async fn follow_or_unfollow(
        &mut self,
        target_user: &str,
    ) -> Result<(), ClientError> {
        let acting_user = self.current_user()?;
        let label = self.profile.as_ref()
            .filter(|profile| profile.username == target_user)
            .and_then(|profile| profile.follow_label)
            .ok_or(ValidationError("follow button is not available"))?;
        let follow = label.intent();
        self.api.set_follow(&acting_user, target_user, follow).await?;
        log::info!(
            "{} {} {}",
            acting_user,
            if follow { "followed" } else { "unfollowed" },
            target_user,
        );
        if let Some(profile) = self.profile.as_mut() {
            profile.follow_label = Some(label.flipped());
        };
        self.refresh();
        self.load_follow_counts(target_user).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api::types::{Post, ServerReply, UserRecord};
    use crate::errors::ApiError;
    use crate::feed::diff::Patch;
    use crate::feed::presenter::test_utils::RecordingPresenter;
    use crate::feed::render::{Element, Region};
    use crate::feed::state::test_utils::create_posts;
    use crate::feed::view::Section;
    use super::*;

    #[derive(Default)]
    struct ServerState {
        posts: Vec<Post>,
        followers: Vec<(String, String)>, // (follower, followee)
        requests: Vec<String>,
        fail_requests: bool,
    }

    #[derive(Default)]
    struct FakeApi {
        state: Mutex<ServerState>,
    }

    impl FakeApi {
        fn with_posts(posts: Vec<Post>) -> Self {
            let api = Self::default();
            api.state.lock().unwrap().posts = posts;
            api
        }

        fn follow(&self, follower: &str, followee: &str) -> () {
            self.state.lock().unwrap().followers
                .push((follower.to_string(), followee.to_string()));
        }
    }

    #[async_trait]
    impl NetworkApi for FakeApi {
        async fn get_posts(&self, route: &Route) -> Result<Vec<Post>, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.requests.push(format!("GET {}", route));
            if state.fail_requests {
                return Err(ApiError::StatusError(500));
            };
            let posts = match route {
                Route::AllPosts => state.posts.clone(),
                Route::UserPosts(username) => state.posts.iter()
                    .filter(|post| &post.poster == username)
                    .cloned()
                    .collect(),
                Route::FollowingPosts(username) => state.posts.iter()
                    .filter(|post| state.followers.iter().any(|(follower, followee)| {
                        follower == username && followee == &post.poster
                    }))
                    .cloned()
                    .collect(),
            };
            Ok(posts)
        }

        async fn create_post(&self, content: &str) -> Result<ServerReply, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.requests.push("POST /posts".to_string());
            if state.fail_requests {
                return Err(ApiError::StatusError(500));
            };
            if content.trim().is_empty() {
                return Ok(ServerReply {
                    error: Some("Content of post cannot be empty".to_string()),
                    ..Default::default()
                });
            };
            let post = Post {
                id: state.posts.len() as u64 + 1,
                poster: "alice".to_string(),
                content: content.to_string(),
                timestamp: "2021-08-01T00:00:00Z".to_string(),
            };
            state.posts.insert(0, post);
            Ok(ServerReply {
                message: Some("Post created sucessfully".to_string()),
                ..Default::default()
            })
        }

        async fn update_post(
            &self,
            post_id: PostId,
            content: &str,
        ) -> Result<ServerReply, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.requests.push(format!("PUT /posts/{}/update", post_id));
            if let Some(post) = state.posts.iter_mut().find(|post| post.id == post_id) {
                post.content = content.to_string();
            };
            Ok(ServerReply {
                message: Some("Post updated".to_string()),
                ..Default::default()
            })
        }

        async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.requests.push(format!("GET /{}", username));
            if state.fail_requests {
                return Err(ApiError::StatusError(500));
            };
            let followers = state.followers.iter()
                .filter(|(_, followee)| followee == username)
                .map(|(follower, _)| follower.clone())
                .collect();
            let following = state.followers.iter()
                .filter(|(follower, _)| follower == username)
                .map(|(_, followee)| followee.clone())
                .collect();
            Ok(UserRecord { followers, following })
        }

        async fn set_follow(
            &self,
            acting_user: &str,
            target_user: &str,
            follow: bool,
        ) -> Result<(), ApiError> {
            let mut state = self.state.lock().unwrap();
            state.requests.push(format!("PUT /{}", acting_user));
            state.followers.retain(|(follower, followee)| {
                !(follower == acting_user && followee == target_user)
            });
            if follow {
                state.followers.push((acting_user.to_string(), target_user.to_string()));
            };
            Ok(())
        }
    }

    type TestController = FeedController<FakeApi, RecordingPresenter>;

    fn create_controller(api: FakeApi, session: Session) -> TestController {
        FeedController::new(api, RecordingPresenter::default(), session)
    }

    fn requests(controller: &TestController) -> Vec<String> {
        controller.api.state.lock().unwrap().requests.clone()
    }

    fn follow_button(page: &Page) -> Option<&Element> {
        page.region(Region::FollowButton).first()
    }

    fn count_text(page: &Page, index: usize) -> Option<String> {
        page.region(Region::FollowCounts)
            .get(index)
            .and_then(|container| container.children[1].text.clone())
    }

    #[tokio::test]
    async fn test_load_posts_group() {
        let api = FakeApi::with_posts(create_posts(25));
        let mut controller = create_controller(api, Session::anonymous());
        let applied = controller.load_posts(Route::AllPosts, 3).await.unwrap();
        assert_eq!(applied, true);
        let page = controller.presenter().last_page();
        assert_eq!(page.region(Region::Posts).len(), 5);
        assert_eq!(page.section, Some(Section::AllPosts));
        let navigation = &page.region(Region::Pagination)[0];
        let items = &navigation.children[0].children;
        assert_eq!(items.first().unwrap().disabled, false);
        assert_eq!(items.last().unwrap().disabled, true);
        assert_eq!(items[3].active, true);
    }

    #[tokio::test]
    async fn test_change_group_keeps_route() {
        let api = FakeApi::with_posts(create_posts(25));
        let mut controller = create_controller(api, Session::anonymous());
        controller.dispatch(Action::ShowProfile("alice".to_string())).await;
        controller.dispatch(Action::GoToGroup(2)).await;
        assert_eq!(
            requests(&controller).last().unwrap(),
            "GET /posts/alice",
        );
        // alice wrote 13 of 25 posts
        assert_eq!(controller.page().region(Region::Posts).len(), 3);
        assert_eq!(controller.feed().current_group(), 2);
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let mut controller = create_controller(FakeApi::default(), Session::anonymous());
        controller.dispatch(Action::ShowAllPosts).await;
        let page = controller.page();
        assert_eq!(page.region(Region::Posts).is_empty(), true);
        assert_eq!(page.region(Region::Pagination).is_empty(), true);
        assert_eq!(controller.presenter().errors.is_empty(), true);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_prior_state() {
        let api = FakeApi::with_posts(create_posts(12));
        let mut controller = create_controller(api, Session::anonymous());
        controller.dispatch(Action::ShowAllPosts).await;
        let rendered = controller.presenter().pages.len();
        controller.api.state.lock().unwrap().fail_requests = true;
        controller.dispatch(Action::GoToGroup(2)).await;
        assert_eq!(controller.presenter().errors, vec!["server responded with status 500"]);
        assert_eq!(controller.presenter().pages.len(), rendered);
        assert_eq!(controller.feed().current_group(), 1);
        assert_eq!(controller.page().region(Region::Posts).len(), 10);
    }

    #[tokio::test]
    async fn test_submit_post() {
        let api = FakeApi::with_posts(create_posts(25));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowAllPosts).await;
        controller.dispatch(Action::GoToGroup(3)).await;
        controller.set_draft("hello");
        controller.dispatch(Action::SubmitPost("hello".to_string())).await;
        assert_eq!(controller.presenter().alerts, vec!["Post created sucessfully"]);
        assert_eq!(controller.new_post_draft(), "");
        assert_eq!(controller.feed().current_group(), 1);
        let page = controller.page();
        let first_post = &page.region(Region::Posts)[0];
        assert_eq!(first_post.children[1].text.as_deref(), Some("hello"));
        let textarea = page.find(|element| {
            element.id.as_deref() == Some("new-post-content")
        }).unwrap();
        assert_eq!(textarea.text.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_submit_empty_post_shows_server_error() {
        let mut controller = create_controller(FakeApi::default(), Session::for_test("alice"));
        controller.dispatch(Action::SubmitPost(" ".to_string())).await;
        assert_eq!(
            controller.presenter().alerts,
            vec!["Content of post cannot be empty"],
        );
        assert_eq!(controller.presenter().errors.is_empty(), true);
    }

    #[tokio::test]
    async fn test_submit_post_failure_keeps_draft() {
        let mut controller = create_controller(FakeApi::default(), Session::for_test("alice"));
        controller.api.state.lock().unwrap().fail_requests = true;
        controller.dispatch(Action::SubmitPost("draft".to_string())).await;
        assert_eq!(controller.new_post_draft(), "draft");
        assert_eq!(controller.presenter().alerts.is_empty(), true);
        assert_eq!(controller.presenter().errors.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_post_requires_user() {
        let mut controller = create_controller(FakeApi::default(), Session::anonymous());
        controller.dispatch(Action::SubmitPost("hello".to_string())).await;
        assert_eq!(controller.presenter().errors, vec!["authentication required"]);
        assert_eq!(requests(&controller).is_empty(), true);
    }

    #[tokio::test]
    async fn test_edit_and_save_post() {
        let api = FakeApi::with_posts(create_posts(25));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowAllPosts).await;
        controller.dispatch(Action::GoToGroup(2)).await;
        // Group 2 starts with post 15 written by alice
        controller.dispatch(Action::EditPost(15)).await;
        assert_eq!(controller.editing().unwrap().draft, "post 10");
        let last_patches = controller.presenter().patches.last().unwrap();
        assert_eq!(last_patches.len(), 1);
        assert!(matches!(
            last_patches[0],
            Patch::ReplaceRegion { region: Region::Posts, .. },
        ));

        controller.set_edit_draft("edited").unwrap();
        let action = controller.page()
            .find(|element| matches!(element.action, Some(Action::SavePost { .. })))
            .and_then(|element| element.action.clone())
            .unwrap();
        controller.dispatch(action).await;
        assert_eq!(controller.presenter().alerts, vec!["Post updated"]);
        assert_eq!(controller.editing(), None);
        // Saving reloads the first group
        assert_eq!(controller.feed().current_group(), 1);
        controller.dispatch(Action::GoToGroup(2)).await;
        let post = &controller.page().region(Region::Posts)[0];
        assert_eq!(post.children[1].text.as_deref(), Some("edited"));
    }

    #[tokio::test]
    async fn test_cancel_edit_reloads_current_group() {
        let api = FakeApi::with_posts(create_posts(25));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::GoToGroup(2)).await;
        controller.dispatch(Action::EditPost(15)).await;
        controller.dispatch(Action::CancelEdit).await;
        assert_eq!(controller.editing(), None);
        assert_eq!(controller.feed().current_group(), 2);
        assert_eq!(
            requests(&controller).iter().filter(|request| request.starts_with("PUT")).count(),
            0,
        );
    }

    #[tokio::test]
    async fn test_edit_foreign_post_is_rejected() {
        let api = FakeApi::with_posts(create_posts(4));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowAllPosts).await;
        // Post 3 is written by bob
        controller.dispatch(Action::EditPost(3)).await;
        assert_eq!(controller.editing(), None);
        assert_eq!(
            controller.presenter().errors,
            vec!["only the poster can edit a post"],
        );
    }

    #[tokio::test]
    async fn test_update_foreign_post_is_rejected() {
        let api = FakeApi::with_posts(create_posts(4));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowAllPosts).await;
        controller.dispatch(Action::SavePost {
            post_id: 3,
            content: "hijacked".to_string(),
        }).await;
        assert_eq!(
            controller.presenter().errors,
            vec!["only the poster can edit a post"],
        );
        assert_eq!(
            requests(&controller).iter().any(|request| request.starts_with("PUT")),
            false,
        );
    }

    #[tokio::test]
    async fn test_show_profile_of_other_user() {
        let api = FakeApi::with_posts(create_posts(6));
        api.follow("alice", "bob");
        api.follow("bob", "carol");
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowProfile("bob".to_string())).await;
        assert_eq!(controller.view(), &ViewState::Profile("bob".to_string()));
        let page = controller.page();
        assert_eq!(page.section, Some(Section::Profile));
        let button = follow_button(page).unwrap();
        assert_eq!(button.text.as_deref(), Some("unfollow"));
        assert_eq!(count_text(page, 0).as_deref(), Some("1"));
        assert_eq!(count_text(page, 1).as_deref(), Some("1"));
        assert_eq!(page.region(Region::Posts).len(), 3);
    }

    #[tokio::test]
    async fn test_own_profile_hides_follow_button() {
        let api = FakeApi::with_posts(create_posts(6));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowProfile("alice".to_string())).await;
        let page = controller.page();
        assert_eq!(follow_button(page).is_none(), true);
        assert_eq!(count_text(page, 0).as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_follow_and_unfollow() {
        let api = FakeApi::with_posts(create_posts(6));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowProfile("bob".to_string())).await;
        let button = follow_button(controller.page()).unwrap();
        assert_eq!(button.text.as_deref(), Some("follow"));

        let action = button.action.clone().unwrap();
        controller.dispatch(action).await;
        let page = controller.page();
        assert_eq!(follow_button(page).unwrap().text.as_deref(), Some("unfollow"));
        assert_eq!(count_text(page, 0).as_deref(), Some("1"));

        controller.dispatch(Action::ToggleFollow("bob".to_string())).await;
        let page = controller.page();
        assert_eq!(follow_button(page).unwrap().text.as_deref(), Some("follow"));
        assert_eq!(count_text(page, 0).as_deref(), Some("0"));
        assert_eq!(
            requests(&controller).iter().filter(|request| *request == "PUT /alice").count(),
            2,
        );
    }

    #[tokio::test]
    async fn test_follow_on_own_profile_is_rejected() {
        let mut controller = create_controller(FakeApi::default(), Session::for_test("alice"));
        controller.dispatch(Action::ShowProfile("alice".to_string())).await;
        controller.dispatch(Action::ToggleFollow("alice".to_string())).await;
        assert_eq!(
            controller.presenter().errors,
            vec!["follow button is not available"],
        );
    }

    #[tokio::test]
    async fn test_show_following() {
        let api = FakeApi::with_posts(create_posts(6));
        api.follow("alice", "bob");
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowFollowing).await;
        let page = controller.page();
        assert_eq!(page.section, Some(Section::Following));
        let posters: Vec<_> = page.region(Region::Posts).iter()
            .map(|post| post.children[0].text.clone().unwrap())
            .collect();
        assert_eq!(posters, vec!["bob", "bob", "bob"]);
        assert_eq!(requests(&controller), vec!["GET /posts/alice/following"]);
    }

    #[tokio::test]
    async fn test_show_following_requires_user() {
        let mut controller = create_controller(FakeApi::default(), Session::anonymous());
        controller.dispatch(Action::ShowFollowing).await;
        assert_eq!(controller.view(), &ViewState::AllPosts);
        assert_eq!(controller.presenter().errors, vec!["authentication required"]);
    }

    #[tokio::test]
    async fn test_poster_link_opens_profile() {
        let api = FakeApi::with_posts(create_posts(3));
        let mut controller = create_controller(api, Session::anonymous());
        controller.dispatch(Action::ShowAllPosts).await;
        let action = controller.page()
            .find(|element| element.class == Some("post-poster"))
            .and_then(|element| element.action.clone())
            .unwrap();
        assert_eq!(action, Action::ShowProfile("alice".to_string()));
        controller.dispatch(action).await;
        assert_eq!(controller.view(), &ViewState::Profile("alice".to_string()));
        // Anonymous viewer can't follow
        assert_eq!(follow_button(controller.page()).is_none(), true);
    }

    #[tokio::test]
    async fn test_switching_views_replaces_sections() {
        let api = FakeApi::with_posts(create_posts(3));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowProfile("bob".to_string())).await;
        controller.dispatch(Action::ShowAllPosts).await;
        let page = controller.page();
        assert_eq!(page.section, Some(Section::AllPosts));
        assert_eq!(page.region(Region::UsernameContainer).is_empty(), true);
        assert_eq!(page.region(Region::FollowButton).is_empty(), true);
        assert_eq!(page.region(Region::NewPostForm).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_view_switch_keeps_prior_view() {
        let api = FakeApi::with_posts(create_posts(6));
        let mut controller = create_controller(api, Session::for_test("alice"));
        controller.dispatch(Action::ShowProfile("bob".to_string())).await;
        controller.api.state.lock().unwrap().fail_requests = true;
        controller.dispatch(Action::ShowAllPosts).await;
        assert_eq!(
            controller.presenter().errors,
            vec!["server responded with status 500"],
        );
        assert_eq!(controller.view(), &ViewState::Profile("bob".to_string()));
        assert_eq!(controller.page().section, Some(Section::Profile));

        // Unrelated refresh renders the same profile
        controller.set_draft("x");
        let page = controller.page();
        assert_eq!(page.section, Some(Section::Profile));
        assert_eq!(page.region(Region::Posts).len(), 3);
        assert_eq!(follow_button(page).is_some(), true);
    }

    #[tokio::test]
    async fn test_failed_profile_load_keeps_prior_view() {
        let api = FakeApi::with_posts(create_posts(12));
        let mut controller = create_controller(api, Session::anonymous());
        controller.dispatch(Action::ShowAllPosts).await;
        controller.api.state.lock().unwrap().fail_requests = true;
        controller.dispatch(Action::ShowProfile("bob".to_string())).await;
        assert_eq!(controller.view(), &ViewState::AllPosts);
        let page = controller.page();
        assert_eq!(page.section, Some(Section::AllPosts));
        assert_eq!(page.region(Region::Posts).len(), 10);
        assert_eq!(page.region(Region::UsernameContainer).is_empty(), true);
    }
}
