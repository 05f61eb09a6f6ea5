pub mod pulls;
pub mod types;

pub use pulls::{list_and_enrich_prs, list_prs};
pub use types::{avatar_url, PullRequest};

use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Build an octocrab client authenticated with the stored token.
/// The same client is shared by every repository fetch.
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to create GitHub client")
}
