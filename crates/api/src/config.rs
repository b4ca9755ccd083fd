//! Application configuration

use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub static_dir: String,
    pub views_dir: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Authentication
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,

    // Feature flags
    pub enable_signup: bool,
}

impl Config {
    /// Load `config.env` and `.env` into the environment if they exist
    pub fn load_dotenv() {
        let _ = dotenvy::from_filename("config.env");
        let _ = dotenvy::dotenv();
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            views_dir: env::var("VIEWS_DIR").unwrap_or_else(|_| "views".to_string()),

            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            // Authentication
            jwt_secret: {
                let secret =
                    env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
                if secret.len() < 32 {
                    return Err(ConfigError::WeakSecret(
                        "JWT_SECRET must be at least 32 characters",
                    ));
                }
                secret
            },
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),

            // Feature flags
            enable_signup: env::var("ENABLE_SIGNUP")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Weak secret: {0}")]
    WeakSecret(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const OPTIONAL_VARS: &[&str] = &[
        "BIND_ADDRESS",
        "STATIC_DIR",
        "VIEWS_DIR",
        "DATABASE_MAX_CONNECTIONS",
        "JWT_EXPIRY_HOURS",
        "ENABLE_SIGNUP",
    ];

    fn setup_minimal_config() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var(
            "JWT_SECRET",
            "test-jwt-secret-must-be-at-least-32-characters-long",
        );
        for var in OPTIONAL_VARS {
            env::remove_var(var);
        }
    }

    fn cleanup_config() {
        env::remove_var("DATABASE_URL");
        env::remove_var("JWT_SECRET");
        for var in OPTIONAL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        setup_minimal_config();

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.views_dir, "views");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.jwt_expiry_hours, 1);
        assert!(config.enable_signup);

        cleanup_config();
    }

    #[test]
    #[serial]
    fn test_missing_database_url() {
        setup_minimal_config();
        env::remove_var("DATABASE_URL");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));

        cleanup_config();
    }

    #[test]
    #[serial]
    fn test_short_jwt_secret_rejected() {
        setup_minimal_config();
        env::set_var("JWT_SECRET", "secret");

        assert!(matches!(Config::from_env(), Err(ConfigError::WeakSecret(_))));

        cleanup_config();
    }

    #[test]
    #[serial]
    fn test_overrides_and_bad_numbers() {
        setup_minimal_config();
        env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
        env::set_var("JWT_EXPIRY_HOURS", "not-a-number");
        env::set_var("ENABLE_SIGNUP", "false");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.jwt_expiry_hours, 1);
        assert!(!config.enable_signup);

        cleanup_config();
    }
}
