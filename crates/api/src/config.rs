use std::str::FromStr;

use striker_core::training::RefundPolicy;

use crate::auth::jwt::JwtConfig;

/// Default whistle balance for new characters.
const DEFAULT_STARTER_WHISTLES: i32 = 15;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT identity token configuration.
    pub jwt: JwtConfig,
    /// Gameplay tunables.
    pub game: GameConfig,
}

/// Tunables for the training lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// Whether cancel refunds may push tickets above the daily maximum.
    pub refund_policy: RefundPolicy,
    /// Whistles granted to a newly created character.
    pub starter_whistles: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            refund_policy: RefundPolicy::Uncapped,
            starter_whistles: DEFAULT_STARTER_WHISTLES,
        }
    }
}

impl GameConfig {
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `TICKET_REFUND_POLICY` | `uncapped` |
    /// | `STARTER_WHISTLES`     | `15`       |
    pub fn from_env() -> Self {
        let refund_policy = std::env::var("TICKET_REFUND_POLICY")
            .map(|v| {
                RefundPolicy::from_str(&v)
                    .unwrap_or_else(|e| panic!("TICKET_REFUND_POLICY is invalid: {e}"))
            })
            .unwrap_or_default();

        let starter_whistles: i32 = std::env::var("STARTER_WHISTLES")
            .unwrap_or_else(|_| DEFAULT_STARTER_WHISTLES.to_string())
            .parse()
            .expect("STARTER_WHISTLES must be a valid i32");
        assert!(starter_whistles >= 0, "STARTER_WHISTLES must not be negative");

        Self {
            refund_policy,
            starter_whistles,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`GameConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            game: GameConfig::from_env(),
        }
    }
}
