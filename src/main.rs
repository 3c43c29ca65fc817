use clap::Parser;
use travel_planner::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Plan(args) => cli::plan::run(args).await,
    }
}
