use crate::{
    client::AppOptions,
    error::{FuzzyError, Result},
};
use std::path::PathBuf;

/// Startup configuration for the backend process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub credentials_file: PathBuf,
    pub data_dir: PathBuf,
    /// Port announced in the readiness line. Nothing listens on it yet.
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_CREDENTIALS_FILE: &'static str = "serviceAccountKey.json";
    pub const DEFAULT_DATA_DIR: &'static str = ".fuzzygo";
    pub const DEFAULT_PORT: u16 = 8080;

    /// Builds a config from raw flag or environment values.
    ///
    /// Startup never aborts on configuration problems: an unusable value is
    /// logged and replaced by its default.
    pub fn from_raw(credentials_file: &str, data_dir: &str, port: &str) -> Self {
        Self {
            credentials_file: or_default(
                parse_path(credentials_file, "credentials file"),
                Self::DEFAULT_CREDENTIALS_FILE.into(),
            ),
            data_dir: or_default(
                parse_path(data_dir, "data directory"),
                Self::DEFAULT_DATA_DIR.into(),
            ),
            port: or_default(parse_port(port), Self::DEFAULT_PORT),
        }
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            credentials_file: self.credentials_file.clone(),
            data_dir: self.data_dir.clone(),
        }
    }
}

pub fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| FuzzyError::ConfigError(format!("invalid port '{value}'")))
}

fn parse_path(value: &str, what: &str) -> Result<PathBuf> {
    if value.trim().is_empty() {
        return Err(FuzzyError::ConfigError(format!("{what} path is empty")));
    }
    Ok(PathBuf::from(value))
}

fn or_default<T: std::fmt::Debug>(value: Result<T>, default: T) -> T {
    value.unwrap_or_else(|err| {
        tracing::warn!("{err}; using default {default:?}");
        default
    })
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from(Self::DEFAULT_CREDENTIALS_FILE),
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            port: Self::DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.credentials_file, PathBuf::from("serviceAccountKey.json"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_from_raw_values() {
        let config = ServerConfig::from_raw("/etc/fuzzygo/key.json", "store", " 9000 ");
        assert_eq!(config.credentials_file, PathBuf::from("/etc/fuzzygo/key.json"));
        assert_eq!(config.data_dir, PathBuf::from("store"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_unusable_values_fall_back_to_defaults() {
        let config = ServerConfig::from_raw("", "  ", "abc");
        assert_eq!(config, ServerConfig::default());

        let config = ServerConfig::from_raw("key.json", "data", "70000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert!(matches!(
            parse_port("-1").unwrap_err(),
            FuzzyError::ConfigError(_)
        ));
    }

    #[test]
    fn test_app_options_follow_config() {
        let config = ServerConfig {
            credentials_file: PathBuf::from("/etc/fuzzygo/key.json"),
            data_dir: PathBuf::from("/var/lib/fuzzygo"),
            port: 9000,
        };
        let options = config.app_options();
        assert_eq!(options.credentials_file, config.credentials_file);
        assert_eq!(options.data_dir, config.data_dir);
    }
}
