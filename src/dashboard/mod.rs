pub mod aggregate;
pub mod metadata;
pub mod project;

pub use aggregate::{aggregate, ContributorAggregate, StatusFilter};
pub use metadata::{compute_metadata, ChartMetadata};
pub use project::{days_from_today, project, ChartData, ChartPoint};

/// Run the full derivation: aggregate matching records per contributor,
/// then project the aggregates into chart points.
pub fn derive_chart(
    records: &[crate::github::types::PullRequest],
    status_filter: StatusFilter,
    include_bots: bool,
) -> ChartData {
    project(&aggregate(records, status_filter, include_bots))
}
