//! the `products` subcommand - manage products and their tokens.
//!
//! these commands open the database directly instead of going through
//! the http surface, so they work on a host without the server running
//! and without an admin token configured.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result};
use veriseal_db::{Database, VerisealDb};
use veriseal_types::{Config, NewProduct, TokenValue};

use super::{load_config_file, parse_database_url};

/// manage products and their tokens
#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// register a product and bind a token to it
    Register(RegisterArgs),

    /// list active tokens with their products
    List(ListArgs),
}

/// database selection shared by product subcommands
#[derive(Args, Debug)]
pub struct DbArgs {
    /// path to config file (toml format)
    #[arg(short, long, env = "VERISEAL_CONFIG")]
    config: Option<PathBuf>,

    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "VERISEAL_DATABASE_URL")]
    database_url: Option<String>,
}

/// register a product and bind a token to it
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    db: DbArgs,

    /// product name
    name: String,

    /// token value to bind (generated when omitted)
    #[arg(short, long)]
    token: Option<String>,

    /// manufacture date (rfc 3339)
    #[arg(long)]
    manufacture_date: Option<String>,

    /// expiry date (rfc 3339)
    #[arg(long)]
    expiry_date: Option<String>,

    /// free-text notes
    #[arg(long)]
    notes: Option<String>,
}

/// list active tokens
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    db: DbArgs,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

impl ProductsCommand {
    /// run the products command
    pub async fn run(self) -> Result<()> {
        match self {
            ProductsCommand::Register(args) => register(args).await,
            ProductsCommand::List(args) => list(args).await,
        }
    }
}

async fn open_db(args: &DbArgs) -> Result<VerisealDb> {
    let mut config = load_config_file(args.config.as_ref())?.unwrap_or_else(Config::default);
    if let Some(db_url) = &args.database_url {
        config.database = parse_database_url(db_url)?;
    }
    VerisealDb::new(&config)
        .await
        .context("failed to open database")
}

fn parse_date(label: &str, value: &str) -> Result<DateTime<Utc>> {
    value
        .parse::<DateTime<Utc>>()
        .with_context(|| format!("invalid {} (expected rfc 3339): {}", label, value))
}

async fn register(args: RegisterArgs) -> Result<()> {
    let db = open_db(&args.db).await?;

    let token_value = match &args.token {
        Some(raw) => TokenValue::new(raw.clone()).context("invalid token value")?,
        None => TokenValue::generate(),
    };

    let mut product = NewProduct::named(&args.name);
    if let Some(raw) = &args.manufacture_date {
        product.manufacture_date = Some(parse_date("manufacture date", raw)?);
    }
    if let Some(raw) = &args.expiry_date {
        product.expiry_date = Some(parse_date("expiry date", raw)?);
    }
    product.notes = args.notes.clone();

    let (registered, token) = db
        .register_product(&product, &token_value)
        .await
        .context("failed to register product")?;

    // the only time the full token value is shown; print it for the
    // label printer and never log it
    println!("Registered product:");
    println!("  ID:    {}", registered.id);
    println!("  Name:  {}", registered.name);
    println!("  Token: {}", token.value);

    Ok(())
}

async fn list(args: ListArgs) -> Result<()> {
    let db = open_db(&args.db).await?;

    let active = db
        .list_active_tokens()
        .await
        .context("failed to list active tokens")?;

    if args.output == "json" {
        let entries: Vec<serde_json::Value> = active
            .iter()
            .map(|(product, token)| {
                serde_json::json!({
                    "product": product,
                    "token": token.value.as_str(),
                    "registered_at": token.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    // table output
    if active.is_empty() {
        println!("No active tokens.");
        return Ok(());
    }

    println!(
        "{:<6} {:<30} {:<20} TOKEN",
        "ID", "PRODUCT", "REGISTERED"
    );
    println!("{}", "-".repeat(80));

    for (product, token) in active {
        println!(
            "{:<6} {:<30} {:<20} {}",
            product.id,
            product.name,
            token.created_at.format("%Y-%m-%d %H:%M"),
            token.value
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("expiry date", "2026-08-29T00:00:00Z").is_ok());
        assert!(parse_date("expiry date", "yesterday").is_err());
    }
}
