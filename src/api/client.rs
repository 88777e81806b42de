use std::cmp::max;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use network_config::{Config, Session};

use crate::errors::ApiError;
use super::routes::{new_post_url, posts_url, update_post_url, user_url, Route};
use super::types::{FollowData, Post, PostData, PostId, ServerReply, UserRecord};

const CONNECTION_TIMEOUT: u64 = 10;
const CSRF_HEADER: &str = "X-CSRFToken";

/// Server API used by the feed controller
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// Returns the whole collection, server side pagination is not supported
    async fn get_posts(&self, route: &Route) -> Result<Vec<Post>, ApiError>;

    async fn create_post(&self, content: &str) -> Result<ServerReply, ApiError>;

    async fn update_post(
        &self,
        post_id: PostId,
        content: &str,
    ) -> Result<ServerReply, ApiError>;

    async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError>;

    async fn set_follow(
        &self,
        acting_user: &str,
        target_user: &str,
        follow: bool,
    ) -> Result<(), ApiError>;
}

fn build_client(timeout: u64) -> reqwest::Result<Client> {
    let request_timeout = Duration::from_secs(timeout);
    let connect_timeout = Duration::from_secs(max(
        timeout,
        CONNECTION_TIMEOUT,
    ));
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .build()
}

/// Parses reply to post creation or update.
/// Rejected requests still carry a JSON body with error text.
fn parse_reply(status: StatusCode, body: &str) -> Result<ServerReply, ApiError> {
    match serde_json::from_str::<ServerReply>(body) {
        Ok(reply) if status.is_success() || reply.text().is_some() => Ok(reply),
        Ok(_) => Err(ApiError::StatusError(status.as_u16())),
        Err(error) if status.is_success() => Err(error.into()),
        Err(_) => Err(ApiError::StatusError(status.as_u16())),
    }
}

async fn read_reply(response: Response) -> Result<ServerReply, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    parse_reply(status, &body)
}

pub struct HttpApiClient {
    client: Client,
    server_url: Url,
    session: Session,
}

impl HttpApiClient {
    pub fn new(
        server_url: Url,
        session: Session,
        timeout: u64,
    ) -> reqwest::Result<Self> {
        let client = build_client(timeout)?;
        Ok(Self { client, server_url, session })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            config.server_url.clone(),
            config.session(),
            config.request_timeout,
        )
    }

    fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request_builder = self.client.request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(ref cookie) = self.session.cookie {
            request_builder = request_builder.header(header::COOKIE, cookie);
        };
        request_builder
    }

    /// Mutating requests must carry CSRF token
    fn build_mutation(
        &self,
        method: Method,
        url: Url,
        payload: &impl serde::Serialize,
    ) -> RequestBuilder {
        let mut request_builder = self.build_request(method, url)
            .json(payload);
        if let Some(ref csrf_token) = self.session.csrf_token {
            request_builder = request_builder.header(CSRF_HEADER, csrf_token);
        };
        request_builder
    }

    fn prepare_get_posts(&self, route: &Route) -> Result<RequestBuilder, ApiError> {
        let url = posts_url(&self.server_url, route)?;
        Ok(self.build_request(Method::GET, url))
    }

    fn prepare_create_post(&self, content: &str) -> Result<RequestBuilder, ApiError> {
        let url = new_post_url(&self.server_url)?;
        let payload = PostData { content };
        Ok(self.build_mutation(Method::POST, url, &payload))
    }

    fn prepare_update_post(
        &self,
        post_id: PostId,
        content: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let url = update_post_url(&self.server_url, post_id)?;
        let payload = PostData { content };
        Ok(self.build_mutation(Method::PUT, url, &payload))
    }

    fn prepare_set_follow(
        &self,
        acting_user: &str,
        target_user: &str,
        follow: bool,
    ) -> Result<RequestBuilder, ApiError> {
        let url = user_url(&self.server_url, acting_user)?;
        let payload = FollowData { follow, user: target_user };
        Ok(self.build_mutation(Method::PUT, url, &payload))
    }
}

#[async_trait]
impl NetworkApi for HttpApiClient {
    async fn get_posts(&self, route: &Route) -> Result<Vec<Post>, ApiError> {
        log::debug!("GET {}", route);
        let posts = self.prepare_get_posts(route)?
            .send().await?
            .error_for_status()?
            .json().await?;
        Ok(posts)
    }

    async fn create_post(&self, content: &str) -> Result<ServerReply, ApiError> {
        log::debug!("POST /posts");
        let response = self.prepare_create_post(content)?.send().await?;
        read_reply(response).await
    }

    async fn update_post(
        &self,
        post_id: PostId,
        content: &str,
    ) -> Result<ServerReply, ApiError> {
        log::debug!("PUT /posts/{}/update", post_id);
        let response = self.prepare_update_post(post_id, content)?
            .send().await?;
        read_reply(response).await
    }

    async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
        log::debug!("GET /{}", username);
        let url = user_url(&self.server_url, username)?;
        let record = self.build_request(Method::GET, url)
            .send().await?
            .error_for_status()?
            .json().await?;
        Ok(record)
    }

    async fn set_follow(
        &self,
        acting_user: &str,
        target_user: &str,
        follow: bool,
    ) -> Result<(), ApiError> {
        log::debug!("PUT /{} follow={} user={}", acting_user, follow, target_user);
        let reply: Value = self.prepare_set_follow(acting_user, target_user, follow)?
            .send().await?
            .error_for_status()?
            .json().await?;
        log::debug!("follow reply: {}", reply);
        Ok(())
    }
}
