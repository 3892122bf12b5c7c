use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Signing settings for admin tokens.
#[derive(Debug, Clone)]
pub struct JwtProperties {
    pub admin_secret_key: String,
    /// Token lifetime in milliseconds.
    pub admin_ttl: i64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtProperties,
    pub admin_initial_password: String,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "port number",
                value: raw,
            })?,
            None => 8080,
        };
        let admin_ttl = match lookup("JWT_ADMIN_TTL") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "JWT_ADMIN_TTL",
                expected: "number of milliseconds",
                value: raw,
            })?,
            None => 7_200_000,
        };

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
            },
            jwt: JwtProperties {
                admin_secret_key: lookup("JWT_ADMIN_SECRET_KEY")
                    .unwrap_or_else(|| "itcast".to_string()),
                admin_ttl,
            },
            admin_initial_password: lookup("ADMIN_INITIAL_PASSWORD")
                .unwrap_or_else(|| "123456".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.jwt.admin_secret_key, "itcast");
        assert_eq!(config.jwt.admin_ttl, 7_200_000);
        assert_eq!(config.admin_initial_password, "123456");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("JWT_ADMIN_SECRET_KEY", "s3cret"),
            ("JWT_ADMIN_TTL", "60000"),
        ])
        .unwrap();
        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert_eq!(config.jwt.admin_secret_key, "s3cret");
        assert_eq!(config.jwt.admin_ttl, 60_000);
    }

    #[test]
    fn test_bad_ttl_is_rejected() {
        let err = load(&[("JWT_ADMIN_TTL", "two hours")]).unwrap_err();
        assert!(err.to_string().contains("JWT_ADMIN_TTL"));
    }
}
