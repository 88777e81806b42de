pub use ammonia::clean_text as escape_html;

/// Escapes attribute value for use inside double quotes
pub fn escape_attribute(value: &str) -> String {
    escape_html(value)
}
