use std::net::{Ipv4Addr, Ipv6Addr};
use url::{ParseError, Url};

pub fn guess_protocol(hostname: &str) -> &'static str {
    if hostname == "localhost" {
        return "http";
    };
    let maybe_ipv4_address = hostname.parse::<Ipv4Addr>();
    if let Ok(_ipv4_address) = maybe_ipv4_address {
        return "http";
    };
    let maybe_ipv6_address = hostname.parse::<Ipv6Addr>();
    if let Ok(_ipv6_address) = maybe_ipv6_address {
        return "http";
    };
    "https"
}

/// Adds scheme if missing and validates the result
pub fn normalize_url(url: &str) -> Result<Url, ParseError> {
    let normalized_url = if
        url.starts_with("http://") ||
        url.starts_with("https://")
    {
        url.to_string()
    } else {
        // Doesn't work for IPv6
        let hostname = if let Some((hostname, _port)) = url.split_once(':') {
            hostname
        } else {
            url
        };
        format!("{}://{}", guess_protocol(hostname), url)
    };
    let url = Url::parse(&normalized_url)?;
    url.host().ok_or(ParseError::EmptyHost)?; // validates URL
    Ok(url)
}
