//! the `admin` subcommand - helpers for the administrative surface.

use clap::{Args, Subcommand};
use color_eyre::eyre::Result;

use crate::handlers;

/// administrative helpers
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// hash a bearer token for the config file
    HashToken(HashTokenArgs),
}

/// hash a bearer token for the config file
#[derive(Args, Debug)]
pub struct HashTokenArgs {
    /// the token to hash
    token: String,
}

impl AdminCommand {
    /// run the admin command
    pub fn run(self) -> Result<()> {
        match self {
            AdminCommand::HashToken(args) => {
                // paste the output into [admin] token_hash
                println!("{}", handlers::hash_token(&args.token));
                Ok(())
            }
        }
    }
}
