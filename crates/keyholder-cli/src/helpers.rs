//! Input helpers: passphrases, secrets and the admin password.
//!
//! Everything read here is wrapped in `Zeroizing` so the buffers are wiped
//! once a command is done with them.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::constants::env;
use crate::errors::CliError;

/// Value of `name` if set and non-empty. Whitespace is kept: it is valid
/// passphrase content.
fn from_env(name: &str) -> Option<Zeroizing<String>> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(Zeroizing::new)
}

fn require_terminal(what: &str, var: &str) -> anyhow::Result<()> {
    if io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::invalid_input(format!(
            "No {} provided and stdin is not a terminal.\nHint: Set {}.",
            what, var
        ))
        .into())
    }
}

/// Passphrase for opening an existing key.
pub fn prompt_passphrase() -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = from_env(env::PASSPHRASE) {
        return Ok(value);
    }
    require_terminal("passphrase", env::PASSPHRASE)?;
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Passphrase for sealing a new value, confirmed when prompted.
pub fn prompt_new_passphrase() -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = from_env(env::PASSPHRASE) {
        return Ok(value);
    }
    require_terminal("passphrase", env::PASSPHRASE)?;
    Password::new()
        .with_prompt("Enter passphrase")
        .with_confirmation("Confirm passphrase", "Passphrases do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Secret value from the flag, piped stdin, or a hidden prompt.
pub fn read_secret(flag: Option<&str>) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = flag {
        return Ok(Zeroizing::new(value.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buffer = Zeroizing::new(String::new());
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(CliError::invalid_input("No secret provided on stdin").into());
        }
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    Password::new()
        .with_prompt("Secret")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))
}

/// Admin password, confirmed when prompted and `confirm` is set.
pub fn prompt_admin_password(confirm: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = from_env(env::ADMIN_PASSWORD) {
        return Ok(value);
    }
    require_terminal("admin password", env::ADMIN_PASSWORD)?;
    let mut prompt = Password::new().with_prompt("Admin password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm admin password", "Passwords do not match");
    }
    prompt
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read admin password: {}", e))
}
