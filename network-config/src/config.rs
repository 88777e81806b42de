use log::{Level as LogLevel};
use serde::{de::Error as DeserializerError, Deserialize, Deserializer};
use url::Url;

use network_utils::{
    cookies::{get_cookie, CSRF_COOKIE_NAME},
    urls::normalize_url,
};

use super::session::Session;

fn default_log_level() -> LogLevel { LogLevel::Info }

const fn default_request_timeout() -> u64 { 30 } // seconds

fn deserialize_server_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    let url_str = String::deserialize(deserializer)?;
    let url = normalize_url(&url_str).map_err(DeserializerError::custom)?;
    Ok(url)
}

#[derive(Clone, Deserialize)]
pub struct Config {
    // Properties auto-populated from the environment
    #[serde(skip)]
    pub config_path: String,

    // Domain name or <IP address>:<port>
    // URI scheme is optional
    #[serde(deserialize_with = "deserialize_server_url")]
    pub server_url: Url,

    // Username shown in the profile link of server-rendered pages
    pub current_user: Option<String>,

    csrf_token: Option<String>,

    // Value of the Cookie header (session and CSRF cookies)
    pub cookie: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Config {
    /// Explicit token takes precedence over the one found in cookie
    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token.clone().or_else(|| {
            self.cookie.as_ref()
                .and_then(|cookie| get_cookie(cookie, CSRF_COOKIE_NAME))
        })
    }

    pub fn session(&self) -> Session {
        Session {
            current_user: self.current_user.clone(),
            csrf_token: self.csrf_token(),
            cookie: self.cookie.clone(),
        }
    }
}
