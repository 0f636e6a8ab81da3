use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub request_timeout_secs: u64,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = lookup("APP_PORT")
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("APP_PORT must be a valid port number")?
            .unwrap_or(8080);
        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?
            .unwrap_or(10);
        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?
            .unwrap_or(30);
        let cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            host,
            port,
            db_max_connections,
            request_timeout_secs,
            session: SessionConfig { cookie_secure },
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
