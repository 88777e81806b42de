pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Finds cookie value in `Cookie` header string
pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(|item| item.trim())
        .find_map(|item| {
            let (key, value) = item.split_once('=')?;
            if key != name {
                return None;
            };
            let decoded = urlencoding::decode(value).ok()?.into_owned();
            Some(decoded)
        })
}
