//! veriseal - self-hosted product authentication server

use clap::Parser;
use color_eyre::eyre::Result;
use veriseal::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(cmd) => cmd.run().await,
        Command::Products(cmd) => cmd.run().await,
        Command::Admin(cmd) => cmd.run(),
    }
}
