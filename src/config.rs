use std::env;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};
use crate::services::session_service::DEFAULT_RETENTION_MINUTES;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub results_file: PathBuf,
    pub users_file: PathBuf,
    pub vocabulary_file: Option<PathBuf>,
    pub generator_seed: Option<u64>,
    pub session_retention_minutes: i64,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            results_file: env::var("RESULTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("quiz_results.csv")),
            users_file: env::var("USERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("users.json")),
            vocabulary_file: env::var("VOCABULARY_FILE").ok().map(PathBuf::from),
            generator_seed: env::var("GENERATOR_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
            session_retention_minutes: env::var("SESSION_RETENTION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(DEFAULT_RETENTION_MINUTES),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }

    /// Rejects configuration that must not reach a production deployment.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            results_file: PathBuf::from("test_quiz_results.csv"),
            users_file: PathBuf::from("test_users.json"),
            vocabulary_file: None,
            generator_seed: Some(7),
            session_retention_minutes: DEFAULT_RETENTION_MINUTES,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            production: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.web_server_host.is_empty());
        assert!(!config.results_file.as_os_str().is_empty());
        assert!(config.jwt_expiration_hours > 0);
        assert!(config.session_retention_minutes > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.web_server_port, 8080);
        assert_eq!(config.generator_seed, Some(7));
        assert!(config.vocabulary_file.is_none());
    }

    #[test]
    fn test_validate_for_production_rejects_short_secret() {
        let config = Config::test_config();
        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_validate_for_production_rejects_default_secret() {
        let config = Config {
            jwt_secret: SecretString::from(DEFAULT_JWT_SECRET.to_string()),
            ..Config::test_config()
        };
        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_validate_for_production_accepts_long_secret() {
        let config = Config {
            jwt_secret: SecretString::from("x".repeat(48)),
            ..Config::test_config()
        };
        assert!(config.validate_for_production().is_ok());
    }
}
