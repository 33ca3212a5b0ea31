//! Hash-password command - prints a stored-password hash for seeding

use std::io::{self, BufRead, Write};

use crate::config::AppConfig;
use crate::infrastructure::user::{create_password_hasher, PasswordHasher};

/// Read one password line from stdin and print its hash
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let hasher = create_password_hasher(config.auth.password_hash, config.auth.bcrypt_cost)?;

    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    if password.is_empty() {
        anyhow::bail!("no password given on stdin");
    }

    let hash = tokio::task::spawn_blocking({
        let password = password.to_string();
        move || hasher.hash(&password)
    })
    .await??;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", hash)?;

    Ok(())
}
