//! CLI module for Simple Auth
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `hash-password`: hash a password read from stdin

pub mod hash_password;
pub mod serve;

use clap::{Parser, Subcommand};

/// Simple Auth - username/password login with stateless bearer tokens
#[derive(Parser)]
#[command(name = "simple-auth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Hash a password read from stdin with the configured algorithm
    HashPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["simple-auth", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from(["simple-auth", "hash-password"]).unwrap();
        assert!(matches!(cli.command, Command::HashPassword));

        assert!(Cli::try_parse_from(["simple-auth"]).is_err());
    }
}
