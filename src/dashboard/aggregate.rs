use std::collections::HashMap;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::github::types::{PullRequest, BOT_MARKER};

/// Restricts which pull-request states contribute to the aggregation.
///
/// Matching is case-insensitive and exact: `Closed` matches `"closed"` only,
/// not `"merged"` (merged PRs still show under `All`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatusFilter {
    Open,
    Closed,
    #[default]
    All,
}

impl StatusFilter {
    pub fn matches(&self, state: &str) -> bool {
        match self {
            StatusFilter::Open => state.eq_ignore_ascii_case("open"),
            StatusFilter::Closed => state.eq_ignore_ascii_case("closed"),
            StatusFilter::All => true,
        }
    }

    /// Cycle to the next filter (used by the TUI toggle key)
    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Open,
            StatusFilter::Open => StatusFilter::Closed,
            StatusFilter::Closed => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
            StatusFilter::All => "all",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-contributor rollup of matching pull requests
#[derive(Debug, Clone)]
pub struct ContributorAggregate {
    pub author: String,
    pub updated_at: DateTime<Utc>,
    pub lines_changed: u64,
}

/// Reduce pull requests into one aggregate per author.
///
/// Records are folded in input order; output order is the order each author
/// first appears in the filtered input. On repeat authors the line total
/// accumulates and the stored timestamp is overwritten by the current record
/// (last seen in iteration order wins, which is not necessarily the newest
/// timestamp - see DESIGN.md).
///
/// Aggregates for bot authors are dropped after the fold unless
/// `include_bots` is set, so hiding bots never changes anyone else's totals.
pub fn aggregate(
    records: &[PullRequest],
    status_filter: StatusFilter,
    include_bots: bool,
) -> Vec<ContributorAggregate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut aggregates: Vec<ContributorAggregate> = Vec::new();

    for pr in records {
        if !status_filter.matches(&pr.state) {
            continue;
        }

        match index.get(&pr.author) {
            Some(&i) => {
                let agg = &mut aggregates[i];
                agg.lines_changed += pr.lines_delta();
                agg.updated_at = pr.updated_at;
            }
            None => {
                index.insert(pr.author.clone(), aggregates.len());
                aggregates.push(ContributorAggregate {
                    author: pr.author.clone(),
                    updated_at: pr.updated_at,
                    lines_changed: pr.lines_delta(),
                });
            }
        }
    }

    if include_bots {
        aggregates
    } else {
        aggregates
            .into_iter()
            .filter(|agg| !agg.author.contains(BOT_MARKER))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn create_test_pr(
        number: u64,
        author: &str,
        state: &str,
        additions: u64,
        deletions: u64,
    ) -> PullRequest {
        PullRequest {
            title: format!("PR #{}", number),
            number,
            author: author.to_string(),
            repo: "owner/repo".to_string(),
            url: format!("https://github.com/owner/repo/pull/{}", number),
            state: state.to_string(),
            updated_at: Utc::now() - Duration::days(number as i64),
            additions,
            deletions,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let aggregates = aggregate(&[], StatusFilter::All, false);
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_accumulates_absolute_line_delta_per_author() {
        // 10-2 open plus 3-1 closed, both from alice
        let prs = vec![
            create_test_pr(1, "alice", "open", 10, 2),
            create_test_pr(2, "alice", "closed", 3, 1),
        ];

        let aggregates = aggregate(&prs, StatusFilter::All, false);
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].author, "alice");
        assert_eq!(aggregates[0].lines_changed, 10);
    }

    #[test]
    fn test_one_aggregate_per_distinct_author() {
        let prs = vec![
            create_test_pr(1, "alice", "open", 5, 0),
            create_test_pr(2, "bob", "open", 7, 0),
            create_test_pr(3, "alice", "open", 2, 0),
        ];

        let aggregates = aggregate(&prs, StatusFilter::All, false);
        assert_eq!(aggregates.len(), 2);
        // Insertion order of first appearance
        assert_eq!(aggregates[0].author, "alice");
        assert_eq!(aggregates[0].lines_changed, 7);
        assert_eq!(aggregates[1].author, "bob");
        assert_eq!(aggregates[1].lines_changed, 7);
    }

    #[test]
    fn test_last_matching_record_wins_for_timestamp() {
        let prs = vec![
            create_test_pr(1, "alice", "open", 5, 0), // newer (1 day old)
            create_test_pr(9, "alice", "open", 2, 0), // older (9 days old)
        ];

        let aggregates = aggregate(&prs, StatusFilter::All, false);
        assert_eq!(aggregates.len(), 1);
        // Iteration order wins, so the 9-day-old timestamp sticks even
        // though it is not the most recent one.
        assert_eq!(aggregates[0].updated_at, prs[1].updated_at);
    }

    #[test]
    fn test_status_filter_is_case_insensitive() {
        let prs = vec![
            create_test_pr(1, "alice", "OPEN", 5, 0),
            create_test_pr(2, "bob", "Closed", 3, 0),
        ];

        let open = aggregate(&prs, StatusFilter::Open, false);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].author, "alice");

        let closed = aggregate(&prs, StatusFilter::Closed, false);
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].author, "bob");
    }

    #[test]
    fn test_closed_filter_excludes_merged() {
        let prs = vec![
            create_test_pr(1, "alice", "merged", 5, 0),
            create_test_pr(2, "bob", "closed", 3, 0),
        ];

        let closed = aggregate(&prs, StatusFilter::Closed, false);
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].author, "bob");

        // Merged records still contribute under All
        let all = aggregate(&prs, StatusFilter::All, false);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_all_is_superset_of_open_and_closed() {
        let prs = vec![
            create_test_pr(1, "alice", "open", 5, 0),
            create_test_pr(2, "bob", "closed", 3, 0),
            create_test_pr(3, "carol", "open", 1, 0),
        ];

        let all = aggregate(&prs, StatusFilter::All, false);
        let open = aggregate(&prs, StatusFilter::Open, false);
        let closed = aggregate(&prs, StatusFilter::Closed, false);

        for agg in open.iter().chain(closed.iter()) {
            assert!(all.iter().any(|a| a.author == agg.author));
        }
        assert_eq!(all.len(), open.len() + closed.len());
    }

    #[test]
    fn test_bots_hidden_by_default() {
        let prs = vec![
            create_test_pr(1, "alice", "open", 5, 0),
            create_test_pr(2, "dependabot[bot]", "open", 100, 0),
        ];

        let aggregates = aggregate(&prs, StatusFilter::All, false);
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].author, "alice");
        // Hiding the bot must not change alice's total
        assert_eq!(aggregates[0].lines_changed, 5);
    }

    #[test]
    fn test_include_bots_keeps_bot_aggregates() {
        let prs = vec![
            create_test_pr(1, "alice", "open", 5, 0),
            create_test_pr(2, "dependabot[bot]", "open", 100, 0),
        ];

        let aggregates = aggregate(&prs, StatusFilter::All, true);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[1].author, "dependabot[bot]");
        assert_eq!(aggregates[1].lines_changed, 100);
    }

    #[test]
    fn test_fully_filtered_input_yields_empty_output() {
        let prs = vec![
            create_test_pr(1, "alice", "draft", 5, 0),
            create_test_pr(2, "dependabot[bot]", "open", 100, 0),
        ];

        // Nothing matches Closed; the draft never matches Open either
        assert!(aggregate(&prs, StatusFilter::Closed, false).is_empty());
        assert!(aggregate(&prs, StatusFilter::Open, false).is_empty());
    }

    #[test]
    fn test_filter_cycle_order() {
        assert_eq!(StatusFilter::All.next(), StatusFilter::Open);
        assert_eq!(StatusFilter::Open.next(), StatusFilter::Closed);
        assert_eq!(StatusFilter::Closed.next(), StatusFilter::All);
    }
}
