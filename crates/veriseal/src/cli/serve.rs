//! the `serve` subcommand - runs the verification server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;
use veriseal_db::VerisealDb;
use veriseal_types::Config;

use super::{load_config_file, parse_database_url};

/// run the veriseal verification server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// path to config file (toml format)
    #[arg(short, long, env = "VERISEAL_CONFIG")]
    config: Option<PathBuf>,

    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "VERISEAL_DATABASE_URL")]
    database_url: Option<String>,

    /// address to listen on
    #[arg(long, env = "VERISEAL_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// server url (for client configuration)
    #[arg(long, env = "VERISEAL_SERVER_URL")]
    server_url: Option<String>,

    /// sha-256 hex hash of the admin bearer token
    #[arg(long, env = "VERISEAL_ADMIN_TOKEN_HASH")]
    admin_token_hash: Option<String>,

    /// log level
    #[arg(long, env = "VERISEAL_LOG_LEVEL")]
    log_level: Option<String>,
}

impl ServeCommand {
    /// convert cli arguments into a config struct, merging with config file if present.
    ///
    /// priority order: defaults -> config file -> cli flags
    fn into_config(self) -> Result<Config> {
        let mut config = match load_config_file(self.config.as_ref())? {
            Some(file_config) => {
                info!("Loaded configuration from file");
                file_config
            }
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        // cli overrides (only if explicitly set)
        if let Some(db_url) = self.database_url {
            config.database = parse_database_url(&db_url)?;
        }
        if let Some(listen_addr) = self.listen_addr {
            config.listen_addr = listen_addr;
        }
        if let Some(server_url) = self.server_url {
            config.server_url = server_url;
        }
        if let Some(hash) = self.admin_token_hash {
            config.admin.token_hash = Some(hash);
        }

        Ok(config)
    }

    /// run the serve command
    pub async fn run(self) -> Result<()> {
        // initialize logging (use CLI override or default to info)
        let log_level_str = self.log_level.clone().unwrap_or_else(|| "info".to_string());
        let log_level = match log_level_str.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        info!("Starting veriseal...");

        let config = self.into_config()?;
        info!("Database: {}", config.database.connection_string);
        info!("Listen address: {}", config.listen_addr);
        info!("Server URL: {}", config.server_url);

        if config.admin.token_hash.is_none() {
            warn!("No admin token hash configured, admin endpoints are disabled");
        }

        // ensure parent directory exists for sqlite databases
        if config.database.db_type == "sqlite" {
            let db_path = std::path::Path::new(&config.database.connection_string);
            if let Some(parent) = db_path.parent()
                && !parent.exists()
            {
                info!("Creating database directory: {:?}", parent);
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory: {:?}", parent)
                })?;
            }
        }

        // initialize database (runs migrations)
        let db = VerisealDb::new(&config)
            .await
            .context("failed to initialize database")?;
        info!("Database initialized successfully");

        // the image decoder is an external collaborator; the server
        // itself ships without one and clients decode symbols locally
        let app = crate::create_app(db, config.clone(), None);

        let addr: SocketAddr = config
            .listen_addr
            .parse()
            .context("invalid listen address")?;

        info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        Ok(())
    }
}

/// wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to register SIGINT handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_toml_file() {
        let toml_content = r#"
server_url = "https://verify.example.com"
listen_addr = "0.0.0.0:443"

[database]
db_type = "sqlite"
connection_string = "/var/lib/veriseal/db.sqlite"

[database.sqlite]
write_ahead_log = true

[admin]
token_hash = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config_file(Some(&file.path().to_path_buf()))
            .unwrap()
            .expect("config should be loaded");

        assert_eq!(config.server_url, "https://verify.example.com");
        assert_eq!(config.listen_addr, "0.0.0.0:443");
        assert_eq!(config.database.db_type, "sqlite");
        assert!(config.database.sqlite.write_ahead_log);
        assert!(config.admin.token_hash.is_some());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let toml_content = r#"
server_url = "https://verify.example.com"
listen_addr = "0.0.0.0:443"

[database]
db_type = "sqlite"
connection_string = "/var/lib/veriseal/db.sqlite"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();
        file.flush().unwrap();

        let cmd = ServeCommand {
            config: Some(file.path().to_path_buf()),
            database_url: Some("sqlite:///tmp/override.db".to_string()),
            listen_addr: Some("127.0.0.1:8080".to_string()),
            server_url: None,
            admin_token_hash: None,
            log_level: None,
        };

        let config = cmd.into_config().unwrap();

        // cli overrides should win
        assert_eq!(config.database.connection_string, "/tmp/override.db");
        assert_eq!(config.listen_addr, "127.0.0.1:8080");

        // config file values should be preserved when not overridden
        assert_eq!(config.server_url, "https://verify.example.com");
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let cmd = ServeCommand {
            config: None,
            database_url: None,
            listen_addr: None,
            server_url: None,
            admin_token_hash: None,
            log_level: None,
        };

        let config = cmd.into_config().unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert!(config.admin.token_hash.is_none());
    }
}
