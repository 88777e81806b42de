/// Client context injected into the feed controller
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub current_user: Option<String>,
    pub csrf_token: Option<String>,
    pub cookie: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_current_user(&self, username: &str) -> bool {
        self.current_user.as_deref() == Some(username)
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_test(username: &str) -> Self {
        Self {
            current_user: Some(username.to_string()),
            csrf_token: Some("test-token".to_string()),
            cookie: None,
        }
    }
}
