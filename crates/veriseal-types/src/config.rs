//! configuration types for veriseal.

use serde::{Deserialize, Serialize};

/// main configuration for veriseal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// public url of this server (for qr payload hints, logs).
    pub server_url: String,

    /// address to bind the http server to.
    pub listen_addr: String,

    /// database configuration.
    pub database: DatabaseConfig,

    /// administrative surface configuration.
    pub admin: AdminConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            database: DatabaseConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

/// database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// database type: "sqlite" or "postgres".
    pub db_type: String,

    /// database connection string or file path.
    pub connection_string: String,

    /// sqlite-specific tuning.
    pub sqlite: SqliteConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            connection_string: "/var/lib/veriseal/db.sqlite".to_string(),
            sqlite: SqliteConfig::default(),
        }
    }
}

/// sqlite-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// enable write-ahead logging (recommended).
    pub write_ahead_log: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            write_ahead_log: true,
        }
    }
}

/// administrative surface configuration.
///
/// registration and inventory listing are gated behind a bearer token.
/// only the sha-256 of the token is stored in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// hex-encoded sha-256 hash of the admin bearer token.
    ///
    /// when unset, the admin http surface rejects every request;
    /// registration is still possible via the cli.
    pub token_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.db_type, "sqlite");
        assert!(config.database.sqlite.write_ahead_log);
        assert!(config.admin.token_hash.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            listen_addr = "127.0.0.1:9090"

            [database]
            connection_string = "/tmp/veriseal-test.sqlite"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9090");
        assert_eq!(config.database.connection_string, "/tmp/veriseal-test.sqlite");
        assert_eq!(config.database.db_type, "sqlite");
    }
}
