use anyhow::{anyhow, Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use octocrab::models::IssueState;
use octocrab::Octocrab;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::github::types::PullRequest;

/// Split an "owner/repo" identifier into its two halves
pub fn split_repo(repo: &str) -> Result<(&str, &str)> {
    let mut parts = repo.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(anyhow!("Invalid repository format '{}'. Expected owner/repo.", repo)),
    }
}

/// List pull requests (all states) for a single repository
pub async fn list_prs(client: &Octocrab, repo: &str) -> Result<Vec<PullRequest>> {
    let (owner, name) = split_repo(repo)?;

    // Retry strategy: exponential backoff with 3 attempts
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3);

    let page = Retry::spawn(retry_strategy, || async {
        client
            .pulls(owner, name)
            .list()
            .state(octocrab::params::State::All)
            .sort(octocrab::params::pulls::Sort::Updated)
            .direction(octocrab::params::Direction::Descending)
            .per_page(100)
            .send()
            .await
            .map_err(|e| {
                // Extract useful error info from octocrab error
                let error_str = format!("{:?}", e);
                if error_str.contains("do not have permission") || error_str.contains("Not Found") {
                    anyhow!("Repository '{}' not found or no access. Check repo name and token permissions (needs 'repo' scope for private repos).", repo)
                } else if error_str.contains("401") || error_str.contains("Bad credentials") {
                    anyhow!("Authentication failed. Your GitHub token may be invalid or expired.")
                } else if error_str.contains("rate limit") || error_str.contains("403") {
                    anyhow!("GitHub API rate limit exceeded. Wait a few minutes and try again.")
                } else {
                    anyhow!("GitHub API error: {}", e)
                }
            })
    })
    .await?;

    let prs: Vec<PullRequest> = page
        .items
        .into_iter()
        .filter_map(|pr| {
            // Records without an author can't be attributed; skip them
            let author = pr.user.as_ref().map(|u| u.login.clone())?;

            // The REST API reports merged PRs as "closed"; fold merged_at
            // back in so the dashboard can tell them apart
            let state = if pr.merged_at.is_some() {
                "merged".to_string()
            } else {
                match pr.state {
                    Some(IssueState::Open) => "open".to_string(),
                    Some(IssueState::Closed) => "closed".to_string(),
                    _ => "open".to_string(),
                }
            };

            Some(PullRequest {
                title: pr.title.clone().unwrap_or_default(),
                number: pr.number,
                author,
                repo: repo.to_string(),
                url: pr
                    .html_url
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| {
                        format!("https://github.com/{}/pull/{}", repo, pr.number)
                    }),
                state,
                updated_at: pr.updated_at.unwrap_or_else(chrono::Utc::now),
                additions: 0, // List API doesn't include these
                deletions: 0, // Will be populated by enrichment
            })
        })
        .collect();

    Ok(prs)
}

/// Fetch PR size (additions, deletions) from the GitHub API
async fn fetch_pr_size(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<(u64, u64)> {
    let pr = client
        .pulls(owner, repo)
        .get(number)
        .await
        .context("Failed to fetch PR details")?;

    let additions = pr.additions.unwrap_or(0) as u64;
    let deletions = pr.deletions.unwrap_or(0) as u64;

    Ok((additions, deletions))
}

/// Enrich a PR with its line counts
async fn enrich_pr(client: &Octocrab, pr: &mut PullRequest) -> Result<()> {
    let (owner, name) = split_repo(&pr.repo)?;

    let (additions, deletions) = fetch_pr_size(client, owner, name, pr.number).await?;
    pr.additions = additions;
    pr.deletions = deletions;

    Ok(())
}

/// Helper function for concurrent PR enrichment
async fn enrich_pr_with_rate_limit_check(
    client: Octocrab,
    mut pr: PullRequest,
    rate_limited: Arc<AtomicBool>,
) -> PullRequest {
    if rate_limited.load(Ordering::Relaxed) {
        return pr; // Skip enrichment if rate limited
    }

    if let Err(e) = enrich_pr(&client, &mut pr).await {
        let err_str = e.to_string();
        if err_str.contains("rate limit") || err_str.contains("403") {
            eprintln!("Warning: Rate limit hit during enrichment. Returning partial results.");
            rate_limited.store(true, Ordering::Relaxed);
        } else {
            eprintln!("Warning: Failed to enrich PR {}: {}", pr.short_ref(), e);
        }
    }
    pr
}

/// List a repository's PRs and enrich each with line counts
pub async fn list_and_enrich_prs(client: &Octocrab, repo: &str) -> Result<Vec<PullRequest>> {
    let prs = list_prs(client, repo).await?;

    // Enrich PRs with bounded concurrency
    const MAX_CONCURRENT_ENRICHMENTS: usize = 10;

    // Rate limit flag shared across concurrent tasks
    let rate_limited = Arc::new(AtomicBool::new(false));

    let mut futures = FuturesUnordered::new();
    let mut prs_iter = prs.into_iter();
    let mut enriched_prs = Vec::new();

    // Fill initial batch
    for _ in 0..MAX_CONCURRENT_ENRICHMENTS {
        if let Some(pr) = prs_iter.next() {
            futures.push(enrich_pr_with_rate_limit_check(
                client.clone(),
                pr,
                rate_limited.clone(),
            ));
        }
    }

    // Process results and feed new tasks
    while let Some(pr) = futures.next().await {
        enriched_prs.push(pr);

        // Add next PR if not rate limited
        if !rate_limited.load(Ordering::Relaxed) {
            if let Some(next_pr) = prs_iter.next() {
                futures.push(enrich_pr_with_rate_limit_check(
                    client.clone(),
                    next_pr,
                    rate_limited.clone(),
                ));
            }
        }
    }

    // Add any remaining unenriched PRs (if rate limited, remaining weren't submitted)
    enriched_prs.extend(prs_iter);

    Ok(enriched_prs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_repo_valid() {
        let (owner, name) = split_repo("open-sauced/app").unwrap();
        assert_eq!(owner, "open-sauced");
        assert_eq!(name, "app");
    }

    #[test]
    fn test_split_repo_rejects_malformed() {
        assert!(split_repo("no-slash").is_err());
        assert!(split_repo("/repo").is_err());
        assert!(split_repo("owner/").is_err());
    }
}
