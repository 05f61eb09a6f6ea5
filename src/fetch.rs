use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;

use crate::github::types::PullRequest;

/// Result of one dashboard fetch pass: the deduplicated record list plus
/// any per-repository warnings (partial failures don't abort the fetch).
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<PullRequest>,
    pub warnings: Vec<String>,
}

/// Fetch pull requests for all configured repositories in parallel and
/// deduplicate them by URL.
///
/// A repository that fails to fetch produces a warning instead of an error;
/// only when every repository fails does the whole fetch fail. This is what
/// lets the dashboard fall back to an empty chart instead of crashing.
pub async fn fetch_pull_requests(
    client: &octocrab::Octocrab,
    repositories: &[String],
    verbose: bool,
) -> Result<FetchOutcome> {
    let mut all_prs = Vec::new();
    let mut warnings = Vec::new();
    let mut any_succeeded = false;

    let mut futures = FuturesUnordered::new();
    for repo in repositories {
        let client = client.clone();
        let repo = repo.clone();
        futures.push(async move {
            let result = crate::github::list_and_enrich_prs(&client, &repo).await;
            (repo, result)
        });
    }

    while let Some((repo, result)) = futures.next().await {
        match result {
            Ok(prs) => {
                if verbose {
                    eprintln!("  Found {} PRs in {}", prs.len(), repo);
                }
                all_prs.extend(prs);
                any_succeeded = true;
            }
            Err(e) => {
                warnings.push(format!("Fetch failed: {} - {}", repo, e));
            }
        }
    }

    // If all repositories failed, return error
    if !any_succeeded && !repositories.is_empty() {
        anyhow::bail!("All repositories failed. Check your network connection and GitHub token.");
    }

    // Deduplicate PRs by URL (overlapping repo entries in config)
    let mut seen_urls = HashSet::new();
    let records: Vec<_> = all_prs
        .into_iter()
        .filter(|pr| seen_urls.insert(pr.url.clone()))
        .collect();

    if verbose {
        eprintln!("After deduplication: {} unique PRs", records.len());
    }

    Ok(FetchOutcome { records, warnings })
}
