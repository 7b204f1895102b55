//! Configuration management for the API server
//!
//! This module loads configuration from environment variables and provides
//! a type-safe configuration struct.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_CONNECT_TIMEOUT_SECONDS`: Deadline for opening a connection (default: 10)
//! - `DATABASE_OPERATION_TIMEOUT_SECONDS`: Deadline for a single statement (default: 30)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to, falling back to `PORT` (default: 8080)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
//! - `RUST_LOG`: Log filter (default: debug for this service)
//!
//! # Example
//!
//! ```no_run
//! use tomato_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use tomato_shared::db::connection::DatabaseConfig as ConnectionConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Seconds to wait for a connection
    pub connect_timeout_seconds: u64,

    /// Seconds a single statement may run
    pub operation_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing
    /// - A numeric variable does not parse
    /// - A database timeout is zero
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let connect_timeout_seconds = parse_timeout(
            "DATABASE_CONNECT_TIMEOUT_SECONDS",
            &env::var("DATABASE_CONNECT_TIMEOUT_SECONDS").unwrap_or_else(|_| "10".to_string()),
        )?;

        let operation_timeout_seconds = parse_timeout(
            "DATABASE_OPERATION_TIMEOUT_SECONDS",
            &env::var("DATABASE_OPERATION_TIMEOUT_SECONDS").unwrap_or_else(|_| "30".to_string()),
        )?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url,
                connect_timeout_seconds,
                operation_timeout_seconds,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Connection settings for the store
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            url: self.database.url.clone(),
            connect_timeout_seconds: self.database.connect_timeout_seconds,
            operation_timeout_seconds: self.database.operation_timeout_seconds,
        }
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_timeout(name: &str, raw: &str) -> anyhow::Result<u64> {
    let seconds = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| anyhow::anyhow!("{} must be a whole number of seconds: {}", name, e))?;

    if seconds == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }

    Ok(seconds)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                connect_timeout_seconds: 10,
                operation_timeout_seconds: 30,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_connection_config() {
        let conn = test_config().connection_config();
        assert_eq!(conn.url, "postgresql://localhost/test");
        assert_eq!(conn.connect_timeout_seconds, 10);
        assert_eq!(conn.operation_timeout_seconds, 30);
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("DATABASE_CONNECT_TIMEOUT_SECONDS", "10").unwrap(), 10);
        assert_eq!(parse_timeout("DATABASE_OPERATION_TIMEOUT_SECONDS", " 30 ").unwrap(), 30);

        let err = parse_timeout("DATABASE_CONNECT_TIMEOUT_SECONDS", "0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "DATABASE_CONNECT_TIMEOUT_SECONDS must be greater than zero"
        );
        assert!(parse_timeout("DATABASE_OPERATION_TIMEOUT_SECONDS", "0").is_err());
        assert!(parse_timeout("DATABASE_CONNECT_TIMEOUT_SECONDS", "soon").is_err());
    }

    #[test]
    fn test_allows_any_origin() {
        let mut config = test_config();
        assert!(config.allows_any_origin());

        config.api.cors_origins = vec!["https://tomato.example".to_string()];
        assert!(!config.allows_any_origin());
    }
}
