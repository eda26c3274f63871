//! Enrol Application CLI

use std::process;

use clap::Parser;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = Cli::parse().run().await {
        #[expect(
            clippy::print_stderr,
            reason = "command failures are reported on stderr"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
