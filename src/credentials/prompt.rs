use anyhow::{Context, Result};

use super::{get_token, get_token_from_env, store_token, CredentialError};

/// Prompts user to enter GitHub personal access token
pub fn prompt_for_token() -> Result<String> {
    println!("GitHub personal access token required.");
    println!("Create one at: https://github.com/settings/tokens");
    println!("Required scopes: repo (for private repos) or public_repo (for public only)");
    println!();

    let token = rpassword::prompt_password("Enter token: ")
        .context("Failed to read token from stdin")?;

    let token = token.trim();

    if token.is_empty() {
        anyhow::bail!("Token cannot be empty");
    }

    Ok(token.to_string())
}

/// Resolve a GitHub token: environment variable first, then keyring,
/// prompting and storing on first run.
pub async fn setup_token_if_missing() -> Result<String> {
    if let Some(token) = get_token_from_env() {
        return Ok(token);
    }

    match get_token().await {
        Ok(token) => Ok(token),
        Err(CredentialError::TokenNotFound) => {
            // Token missing, prompt for it
            let token = prompt_for_token()?;

            store_token(token.clone())
                .await
                .context("Failed to store token in keyring")?;

            println!("Token stored securely in system keyring.");

            Ok(token)
        }
        Err(e) => Err(e).context("Failed to access system keyring"),
    }
}
