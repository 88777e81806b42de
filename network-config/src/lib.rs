mod config;
mod loader;
mod session;

pub use config::Config;
pub use loader::{parse_config, parse_config_str};
pub use session::Session;

pub const NETWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("invalid yaml data: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("{0}")]
    ValidationError(&'static str),
}
