//! Operator commands.

use clap::{Parser, Subcommand};

mod cart;
mod content_store;
mod purchase;

#[derive(Debug, Parser)]
#[command(name = "enrol-app", about = "Enrol CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Purchase(purchase::PurchaseCommand),
    Cart(cart::CartCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Purchase(command) => purchase::run(command).await,
            Commands::Cart(command) => cart::run(command),
        }
    }
}
