use super::config::Config;
use super::ConfigError;

struct EnvConfig {
    config_path: String,
}

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

fn parse_env() -> EnvConfig {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();
    let config_path = std::env::var("CONFIG_PATH")
        .unwrap_or(DEFAULT_CONFIG_PATH.to_string());
    EnvConfig { config_path }
}

/// Parses and validates configuration, returns config and warnings
pub fn parse_config_str(
    config_yaml: &str,
) -> Result<(Config, Vec<&'static str>), ConfigError> {
    let config = serde_yaml::from_str::<Config>(config_yaml)?;
    let mut warnings = vec![];

    // Validate config
    if config.request_timeout == 0 {
        return Err(ConfigError::ValidationError("request_timeout must be positive"));
    };
    if let Some(ref current_user) = config.current_user {
        if current_user.trim().is_empty() {
            return Err(ConfigError::ValidationError("current_user can not be empty"));
        };
        if config.csrf_token().is_none() {
            warnings.push("CSRF token is not set, mutating requests will be rejected");
        };
    } else {
        warnings.push("current_user is not set, posting and following are disabled");
    };
    Ok((config, warnings))
}

pub fn parse_config() -> Result<(Config, Vec<&'static str>), ConfigError> {
    let env = parse_env();
    let config_yaml = std::fs::read_to_string(&env.config_path)?;
    let (mut config, warnings) = parse_config_str(&config_yaml)?;
    config.config_path = env.config_path;
    Ok((config, warnings))
}
