//! API configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Frontend origin used in development.
pub const DEVELOPMENT_ORIGIN: &str = "http://localhost:3000";

/// Frontend origin used everywhere else.
pub const PRODUCTION_ORIGIN: &str = "https://concisedocs.vercel.app";

/// Runtime mode, fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    /// Parse a mode flag. Only `development` selects development mode.
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("development") {
            RuntimeMode::Development
        } else {
            RuntimeMode::Production
        }
    }

    /// Mode from the `APP_ENV` and `NODE_ENV` values. `APP_ENV` wins when
    /// set; with neither set the mode is production.
    pub fn from_vars(app_env: Option<&str>, node_env: Option<&str>) -> Self {
        app_env
            .or(node_env)
            .map(Self::from_flag)
            .unwrap_or(RuntimeMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
        }
    }

    /// Base URL of the frontend for this mode.
    pub fn origin_url(&self) -> &'static str {
        match self {
            RuntimeMode::Development => DEVELOPMENT_ORIGIN,
            RuntimeMode::Production => PRODUCTION_ORIGIN,
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session token verification settings.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Shared secret for HS256 session tokens
    pub jwt_secret: Option<String>,
    /// PEM public key for RS256 session tokens (takes precedence)
    pub jwt_public_key_pem: Option<String>,
    /// Expected `iss` claim
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        self.jwt_secret.is_some() || self.jwt_public_key_pem.is_some()
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Request timeout
    pub request_timeout: Duration,
    /// Max request body size
    pub max_body_size: usize,
    /// Runtime mode (development/production)
    pub mode: RuntimeMode,
    /// JSON plan catalog; the built-in catalog is used when unset
    pub plan_catalog_path: Option<PathBuf>,
    /// Billing price id of the built-in Pro plan
    pub pro_price_id: Option<String>,
    /// Checkout link of the built-in Pro plan
    pub pro_payment_link: Option<String>,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// Session token verification
    pub auth: AuthConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![DEVELOPMENT_ORIGIN.to_string()],
            request_timeout: Duration::from_secs(30),
            max_body_size: 64 * 1024,
            mode: RuntimeMode::Development,
            plan_catalog_path: None,
            pro_price_id: None,
            pro_payment_link: None,
            metrics_enabled: true,
            auth: AuthConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mode = RuntimeMode::from_vars(
            std::env::var("APP_ENV").ok().as_deref(),
            std::env::var("NODE_ENV").ok().as_deref(),
        );

        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec![mode.origin_url().to_string()]),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024),
            mode,
            plan_catalog_path: non_empty_var("PLAN_CATALOG_PATH").map(PathBuf::from),
            pro_price_id: non_empty_var("PRO_PRICE_ID"),
            pro_payment_link: non_empty_var("PRO_PAYMENT_LINK"),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            auth: AuthConfig {
                jwt_secret: non_empty_var("AUTH_JWT_SECRET"),
                jwt_public_key_pem: non_empty_var("AUTH_JWT_PUBLIC_KEY"),
                issuer: non_empty_var("AUTH_ISSUER"),
            },
        }
    }

    /// Base URL of the frontend.
    pub fn origin_url(&self) -> &'static str {
        self.mode.origin_url()
    }

    /// Absolute frontend URL for `path`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.origin_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(RuntimeMode::from_flag("development"), RuntimeMode::Development);
        assert_eq!(RuntimeMode::from_flag("Development"), RuntimeMode::Development);
        assert_eq!(RuntimeMode::from_flag("production"), RuntimeMode::Production);
        assert_eq!(RuntimeMode::from_flag("test"), RuntimeMode::Production);
        assert_eq!(RuntimeMode::from_flag(""), RuntimeMode::Production);
    }

    #[test]
    fn test_mode_from_vars() {
        assert_eq!(RuntimeMode::from_vars(None, None), RuntimeMode::Production);
        assert_eq!(
            RuntimeMode::from_vars(None, Some("development")),
            RuntimeMode::Development
        );
        assert_eq!(
            RuntimeMode::from_vars(Some("production"), Some("development")),
            RuntimeMode::Production
        );
        assert_eq!(
            RuntimeMode::from_vars(Some("development"), Some("production")),
            RuntimeMode::Development
        );
    }

    #[test]
    fn test_origin_url_by_mode() {
        assert_eq!(RuntimeMode::Development.origin_url(), "http://localhost:3000");
        assert_eq!(RuntimeMode::Production.origin_url(), "https://concisedocs.vercel.app");
    }

    #[test]
    fn test_url_for_joins_paths() {
        let config = ApiConfig {
            mode: RuntimeMode::Production,
            ..ApiConfig::default()
        };
        assert_eq!(config.url_for("/upload"), "https://concisedocs.vercel.app/upload");
        assert_eq!(config.url_for("sign-in"), "https://concisedocs.vercel.app/sign-in");
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.mode, RuntimeMode::Development);
        assert!(!config.auth.is_configured());
    }
}
