//! Configuration module
//!
//! All settings come from the environment (optionally seeded from a `.env` file).
//! The listening port, the storage service location and the lookup store connection
//! are required; a missing value is a startup error, never a runtime one.

use std::env;
use std::time::Duration;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const RESOLVE_TIMEOUT_MS: u64 = 5_000;
const STORAGE_CONNECT_TIMEOUT_SECS: u64 = 5;
const STORAGE_RESPONSE_TIMEOUT_SECS: u64 = 30;
const STORAGE_READ_TIMEOUT_SECS: u64 = 30;
const HISTORY_TIMEOUT_SECS: u64 = 10;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const DEFAULT_HISTORY_HOST: &str = "history";

/// Gateway configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    // Lookup store
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub run_migrations: bool,
    pub resolve_timeout_ms: u64,
    // Storage service
    pub video_storage_host: String,
    pub video_storage_port: u16,
    pub storage_connect_timeout_secs: u64,
    pub storage_response_timeout_secs: u64,
    pub storage_read_timeout_secs: u64,
    // History service
    pub history_host: String,
    pub history_timeout_secs: u64,
    // HTTP server
    pub http_concurrency_limit: usize,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset, matching how the deployment manifests
    /// blank out variables they do not use.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str, hint: &str| {
            var(key).ok_or_else(|| {
                anyhow::anyhow!(
                    "Please specify {} with the environment variable {}.",
                    hint,
                    key
                )
            })
        };

        let environment = environment_from(&lookup);

        let server_port = required("PORT", "the port number for the HTTP server")?
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let video_storage_host = required(
            "VIDEO_STORAGE_HOST",
            "the host name for the video storage microservice",
        )?;
        let video_storage_port = required(
            "VIDEO_STORAGE_PORT",
            "the port number for the video storage microservice",
        )?
        .parse()
        .map_err(|_| anyhow::anyhow!("VIDEO_STORAGE_PORT must be a valid number"))?;

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = required("DBHOST", "the database host (or DATABASE_URL)")?;
                let name = required("DBNAME", "the name of the database")?;
                format!("{}/{}", host.trim_end_matches('/'), name)
            }
        };

        let config = Config {
            server_port,
            environment,
            database_url,
            db_max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_or(&var, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            run_migrations: var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase())
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            resolve_timeout_ms: parse_or(&var, "RESOLVE_TIMEOUT_MS", RESOLVE_TIMEOUT_MS),
            video_storage_host,
            video_storage_port,
            storage_connect_timeout_secs: parse_or(
                &var,
                "STORAGE_CONNECT_TIMEOUT_SECS",
                STORAGE_CONNECT_TIMEOUT_SECS,
            ),
            storage_response_timeout_secs: parse_or(
                &var,
                "STORAGE_RESPONSE_TIMEOUT_SECS",
                STORAGE_RESPONSE_TIMEOUT_SECS,
            ),
            storage_read_timeout_secs: parse_or(
                &var,
                "STORAGE_READ_TIMEOUT_SECS",
                STORAGE_READ_TIMEOUT_SECS,
            ),
            history_host: var("HISTORY_HOST").unwrap_or_else(|| DEFAULT_HISTORY_HOST.to_string()),
            history_timeout_secs: parse_or(&var, "HISTORY_TIMEOUT_SECS", HISTORY_TIMEOUT_SECS),
            http_concurrency_limit: parse_or(&var, "HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT),
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT cannot be 0"));
        }

        if self.video_storage_port == 0 {
            return Err(anyhow::anyhow!("VIDEO_STORAGE_PORT cannot be 0"));
        }

        if !(self.database_url.starts_with("postgresql://")
            || self.database_url.starts_with("postgres://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL (or DBHOST) must be a valid PostgreSQL connection string"
            ));
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("Database max connections cannot be 0"));
        }

        let timeouts = [
            ("DB_TIMEOUT_SECONDS", self.db_timeout_seconds),
            ("RESOLVE_TIMEOUT_MS", self.resolve_timeout_ms),
            ("STORAGE_CONNECT_TIMEOUT_SECS", self.storage_connect_timeout_secs),
            ("STORAGE_RESPONSE_TIMEOUT_SECS", self.storage_response_timeout_secs),
            ("STORAGE_READ_TIMEOUT_SECS", self.storage_read_timeout_secs),
            ("HISTORY_TIMEOUT_SECS", self.history_timeout_secs),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(anyhow::anyhow!("{} cannot be 0", name));
            }
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_environment(&self.environment)
    }

    /// `host:port` of the storage service.
    pub fn storage_authority(&self) -> String {
        format!("{}:{}", self.video_storage_host, self.video_storage_port)
    }

    /// Base URL of the history service. A bare host name is reached over plain http.
    pub fn history_base_url(&self) -> String {
        let host = self.history_host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        }
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }

    pub fn storage_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_connect_timeout_secs)
    }

    pub fn storage_response_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_response_timeout_secs)
    }

    pub fn storage_read_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_read_timeout_secs)
    }
}

/// Deployment environment name: `ENVIRONMENT`, then `APP_ENV`, then `development`.
/// Blank values count as unset.
pub fn environment_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["ENVIRONMENT", "APP_ENV"]
        .into_iter()
        .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "development".to_string())
}

pub fn is_production_environment(environment: &str) -> bool {
    let env = environment.trim().to_lowercase();
    env == "production" || env == "prod"
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("PORT", "3000"),
            ("VIDEO_STORAGE_HOST", "video-storage"),
            ("VIDEO_STORAGE_PORT", "80"),
            ("DATABASE_URL", "postgresql://postgres:postgres@db:5432/video-streaming"),
        ]
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_lookup(lookup(&minimal())).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.storage_authority(), "video-storage:80");
        assert_eq!(config.history_base_url(), "http://history");
        assert_eq!(config.resolve_timeout(), Duration::from_millis(5_000));
        assert_eq!(config.db_max_connections, 20);
        assert!(config.run_migrations);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_port_is_fatal() {
        let vars: Vec<_> = minimal().into_iter().filter(|(k, _)| *k != "PORT").collect();
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_empty_storage_host_is_fatal() {
        let mut vars = minimal();
        vars.retain(|(k, _)| *k != "VIDEO_STORAGE_HOST");
        vars.push(("VIDEO_STORAGE_HOST", "  "));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("VIDEO_STORAGE_HOST"));
    }

    #[test]
    fn test_dbhost_and_dbname_are_joined() {
        let mut vars = minimal();
        vars.retain(|(k, _)| *k != "DATABASE_URL");
        vars.push(("DBHOST", "postgres://postgres:postgres@db:5432/"));
        vars.push(("DBNAME", "video-streaming"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.database_url,
            "postgres://postgres:postgres@db:5432/video-streaming"
        );
    }

    #[test]
    fn test_dbhost_without_dbname_is_fatal() {
        let mut vars = minimal();
        vars.retain(|(k, _)| *k != "DATABASE_URL");
        vars.push(("DBHOST", "postgres://db:5432"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("DBNAME"));
    }

    #[test]
    fn test_non_postgres_url_is_rejected() {
        let mut vars = minimal();
        vars.retain(|(k, _)| *k != "DATABASE_URL");
        vars.push(("DATABASE_URL", "mongodb://db:27017"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut vars = minimal();
        vars.push(("HISTORY_TIMEOUT_SECS", "0"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("HISTORY_TIMEOUT_SECS"));
    }

    #[test]
    fn test_history_host_with_scheme_is_kept() {
        let mut vars = minimal();
        vars.push(("HISTORY_HOST", "https://history.internal:8443/"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.history_base_url(), "https://history.internal:8443");
    }

    #[test]
    fn test_production_detection() {
        let mut vars = minimal();
        vars.push(("APP_ENV", "Prod"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_blank_environment_falls_back_to_app_env() {
        let vars = [("ENVIRONMENT", ""), ("APP_ENV", "production")];
        let environment = environment_from(lookup(&vars));
        assert_eq!(environment, "production");
        assert!(is_production_environment(&environment));

        let mut vars = minimal();
        vars.push(("ENVIRONMENT", "  "));
        vars.push(("APP_ENV", "production"));
        assert!(Config::from_lookup(lookup(&vars)).unwrap().is_production());
    }

    #[test]
    fn test_environment_defaults_to_development() {
        let environment = environment_from(lookup(&[]));
        assert_eq!(environment, "development");
        assert!(!is_production_environment(&environment));
    }
}
