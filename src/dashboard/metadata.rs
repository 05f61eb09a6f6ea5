use serde::Serialize;

use crate::github::types::PullRequest;

/// Headline counts for the stats header, always taken over the full
/// unfiltered record list regardless of the active toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChartMetadata {
    pub all_prs: usize,
    pub open_prs: usize,
    pub closed_prs: usize,
}

/// Count all/open/closed+merged records. States outside the known set
/// (e.g. "draft") count toward `all_prs` only.
pub fn compute_metadata(records: &[PullRequest]) -> ChartMetadata {
    let open_prs = records
        .iter()
        .filter(|pr| pr.state.eq_ignore_ascii_case("open"))
        .count();
    let closed_prs = records
        .iter()
        .filter(|pr| {
            pr.state.eq_ignore_ascii_case("closed") || pr.state.eq_ignore_ascii_case("merged")
        })
        .count();

    ChartMetadata {
        all_prs: records.len(),
        open_prs,
        closed_prs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_pr(number: u64, state: &str) -> PullRequest {
        PullRequest {
            title: format!("PR #{}", number),
            number,
            author: "alice".to_string(),
            repo: "owner/repo".to_string(),
            url: format!("https://github.com/owner/repo/pull/{}", number),
            state: state.to_string(),
            updated_at: Utc::now(),
            additions: 1,
            deletions: 0,
        }
    }

    #[test]
    fn test_empty_input_counts_zero() {
        assert_eq!(compute_metadata(&[]), ChartMetadata::default());
    }

    #[test]
    fn test_merged_counts_as_closed() {
        let prs = vec![
            create_test_pr(1, "open"),
            create_test_pr(2, "closed"),
            create_test_pr(3, "merged"),
            create_test_pr(4, "OPEN"),
        ];

        let metadata = compute_metadata(&prs);
        assert_eq!(metadata.all_prs, 4);
        assert_eq!(metadata.open_prs, 2);
        assert_eq!(metadata.closed_prs, 2);
    }

    #[test]
    fn test_unknown_state_counts_in_all_only() {
        let prs = vec![create_test_pr(1, "draft"), create_test_pr(2, "open")];

        let metadata = compute_metadata(&prs);
        assert_eq!(metadata.all_prs, 2);
        assert_eq!(metadata.open_prs, 1);
        assert_eq!(metadata.closed_prs, 0);
    }
}
