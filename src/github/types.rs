use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Substring GitHub uses to mark automated accounts (e.g. "dependabot[bot]")
pub const BOT_MARKER: &str = "[bot]";

/// Placeholder identity used when resolving an avatar for a bot account
pub const BOT_AVATAR_LOGIN: &str = "octocat";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: String,
    pub number: u64,
    pub author: String,         // GitHub login
    pub repo: String,           // "owner/repo" format
    pub url: String,            // HTML URL for browser
    pub state: String,          // "open", "closed" or "merged" (compared case-insensitively)
    pub updated_at: DateTime<Utc>,
    pub additions: u64,         // Lines added
    pub deletions: u64,         // Lines deleted
}

impl PullRequest {
    /// Absolute difference between added and deleted lines. This is the
    /// per-record contribution to a contributor's `lines_changed` total.
    pub fn lines_delta(&self) -> u64 {
        self.additions.abs_diff(self.deletions)
    }

    /// Whether the author is an automated account
    pub fn is_bot(&self) -> bool {
        self.author.contains(BOT_MARKER)
    }

    /// Return a short reference in the format "owner/repo#123"
    pub fn short_ref(&self) -> String {
        format!("{}#{}", self.repo, self.number)
    }
}

/// Build the avatar image URL for a GitHub login at the given pixel size
pub fn avatar_url(login: &str, size: u32) -> String {
    format!("https://github.com/{}.png?size={}", login, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pr(author: &str, additions: u64, deletions: u64) -> PullRequest {
        PullRequest {
            title: "test".to_string(),
            number: 1,
            author: author.to_string(),
            repo: "owner/repo".to_string(),
            url: "https://github.com/owner/repo/pull/1".to_string(),
            state: "open".to_string(),
            updated_at: Utc::now(),
            additions,
            deletions,
        }
    }

    #[test]
    fn test_lines_delta_is_absolute() {
        assert_eq!(create_test_pr("alice", 3, 10).lines_delta(), 7);
        assert_eq!(create_test_pr("alice", 10, 3).lines_delta(), 7);
        assert_eq!(create_test_pr("alice", 5, 5).lines_delta(), 0);
    }

    #[test]
    fn test_is_bot_matches_marker() {
        assert!(create_test_pr("dependabot[bot]", 1, 1).is_bot());
        assert!(!create_test_pr("alice", 1, 1).is_bot());
    }

    #[test]
    fn test_avatar_url_format() {
        assert_eq!(
            avatar_url("octocat", 40),
            "https://github.com/octocat.png?size=40"
        );
    }
}
