use clap::{Args, Subcommand};

mod check;

#[derive(Debug, Args)]
pub(crate) struct PurchaseCommand {
    #[command(subcommand)]
    command: PurchaseSubcommand,
}

#[derive(Debug, Subcommand)]
enum PurchaseSubcommand {
    Check(check::CheckPurchaseArgs),
}

pub(crate) async fn run(command: PurchaseCommand) -> Result<(), String> {
    match command.command {
        PurchaseSubcommand::Check(args) => check::run(args).await,
    }
}
