#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

/// Request failed or response is malformed
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error("json parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("server responded with status {0}")]
    StatusError(u16),
}

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    ApiError(#[from] ApiError),

    #[error("{0}")]
    ValidationError(#[from] ValidationError),
}

impl ClientError {
    pub fn authentication_required() -> Self {
        ValidationError("authentication required").into()
    }
}
