use clap::Parser;
use simple_auth::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::HashPassword => cli::hash_password::run().await,
    }
}
