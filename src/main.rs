//! Ikigai CLI entry point.

use clap::Parser;

use ikigai::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = ikigai::cli::run(cli).await {
        ikigai::cli::handle_error(err, json);
    }
}
