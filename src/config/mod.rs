use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub http: HttpConfig,
    pub services: ServicesConfig,
    pub rpc: RpcConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

/// Backend service addresses, dialed once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub user: String,
    pub auth: String,
    pub category: String,
    pub post: String,
    pub comment: String,
    pub like: String,
}

impl ServicesConfig {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("user", self.user.as_str()),
            ("auth", self.auth.as_str()),
            ("category", self.category.as_str()),
            ("post", self.post.as_str()),
            ("comment", self.comment.as_str()),
            ("like", self.like.as_str()),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    pub permissions_file: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,

    #[error("{service} service address '{addr}' must start with http:// or https://")]
    InvalidAddress { service: &'static str, addr: String },
}

const DEFAULT_USER_SERVICE_ADDR: &str = "http://localhost:9000";
const DEFAULT_POST_SERVICE_ADDR: &str = "http://localhost:9001";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // HTTP overrides
        if let Ok(v) = env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
            self.http.port = v.parse().unwrap_or(self.http.port);
        }
        if let Ok(v) = env::var("HTTP_ENABLE_REQUEST_LOGGING") {
            self.http.enable_request_logging = v.parse().unwrap_or(self.http.enable_request_logging);
        }

        // Service addresses; auth rides on the user service and the blog
        // resources on the post service unless pointed elsewhere
        if let Ok(v) = env::var("USER_SERVICE_ADDR") {
            self.services.user = v;
        }
        if let Ok(v) = env::var("POST_SERVICE_ADDR") {
            self.services.post = v;
        }
        self.services.auth = env::var("AUTH_SERVICE_ADDR").unwrap_or_else(|_| self.services.user.clone());
        self.services.category = env::var("CATEGORY_SERVICE_ADDR").unwrap_or_else(|_| self.services.post.clone());
        self.services.comment = env::var("COMMENT_SERVICE_ADDR").unwrap_or_else(|_| self.services.post.clone());
        self.services.like = env::var("LIKE_SERVICE_ADDR").unwrap_or_else(|_| self.services.post.clone());

        // RPC overrides
        if let Ok(v) = env::var("RPC_TIMEOUT_SECS") {
            self.rpc.timeout_secs = v.parse().unwrap_or(self.rpc.timeout_secs);
        }
        if let Ok(v) = env::var("RPC_CONNECT_TIMEOUT_SECS") {
            self.rpc.connect_timeout_secs = v.parse().unwrap_or(self.rpc.connect_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("PERMISSIONS_FILE") {
            self.security.permissions_file = Some(v);
        }

        self
    }

    /// Startup checks; a gateway that cannot verify tokens or dial its
    /// backends must not start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        for (service, addr) in self.services.iter() {
            if !(addr.starts_with("http://") || addr.starts_with("https://")) {
                return Err(ConfigError::InvalidAddress {
                    service,
                    addr: addr.to_string(),
                });
            }
        }

        Ok(())
    }

    fn services_default() -> ServicesConfig {
        ServicesConfig {
            user: DEFAULT_USER_SERVICE_ADDR.to_string(),
            auth: DEFAULT_USER_SERVICE_ADDR.to_string(),
            category: DEFAULT_POST_SERVICE_ADDR.to_string(),
            post: DEFAULT_POST_SERVICE_ADDR.to_string(),
            comment: DEFAULT_POST_SERVICE_ADDR.to_string(),
            like: DEFAULT_POST_SERVICE_ADDR.to_string(),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            http: HttpConfig {
                port: 8000,
                enable_request_logging: true,
            },
            services: Self::services_default(),
            rpc: RpcConfig {
                timeout_secs: 30,
                connect_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                permissions_file: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            http: HttpConfig {
                port: 8000,
                enable_request_logging: true,
            },
            services: Self::services_default(),
            rpc: RpcConfig {
                timeout_secs: 10,
                connect_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                cors_origins: vec!["https://staging.example.com".to_string()],
                permissions_file: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            http: HttpConfig {
                port: 8000,
                enable_request_logging: false,
            },
            services: Self::services_default(),
            rpc: RpcConfig {
                timeout_secs: 5,
                connect_timeout_secs: 3,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                cors_origins: vec!["https://app.example.com".to_string()],
                permissions_file: None,
            },
        }
    }
}

// Global singleton config - read by the bootstrap only; request handling
// receives what it needs through AppState
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.http.port, 8000);
        assert!(config.http.enable_request_logging);
        assert_eq!(config.services.auth, config.services.user);
        assert_eq!(config.services.like, config.services.post);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.http.enable_request_logging);
        assert!(config.rpc.timeout_secs < AppConfig::development().rpc.timeout_secs);
        assert!(config.security.jwt_secret.is_empty());
    }

    #[test]
    fn validate_requires_secret() {
        let mut config = AppConfig::development();
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));

        config.security.jwt_secret = "s3cret".to_string();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_schemeless_address() {
        let mut config = AppConfig::development();
        config.security.jwt_secret = "s3cret".to_string();
        config.services.comment = "localhost:9001".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAddress { service: "comment", .. })
        ));
    }

    #[test]
    fn secret_is_never_serialized() {
        let mut config = AppConfig::development();
        config.security.jwt_secret = "hunter2".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
