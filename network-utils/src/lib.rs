pub mod cookies;
pub mod html;
pub mod urls;
