use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregate::ContributorAggregate;
use crate::github::types::{avatar_url, BOT_AVATAR_LOGIN, BOT_MARKER};

/// Avatar pixel size requested for chart points
const AVATAR_SIZE: u32 = 40;

/// One plotted contributor: recency on x, lines changed on y
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub x: u64,             // whole days since the contributor's last update
    pub y: u64,             // accumulated lines changed
    pub contributor: String,
    pub image: String,      // avatar URL
}

/// Chart-ready payload: the points plus the y-axis ceiling
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub max_y: u64,
}

/// Whole days between now and `timestamp`, truncated toward zero and
/// clamped at zero for timestamps in the future.
pub fn days_from_today(timestamp: DateTime<Utc>) -> u64 {
    (Utc::now() - timestamp).num_days().max(0) as u64
}

/// Map aggregates to plot points and compute the maximum y value.
///
/// Bot identities get the placeholder avatar; the contributor name on the
/// point keeps the real login either way.
pub fn project(aggregates: &[ContributorAggregate]) -> ChartData {
    let points: Vec<ChartPoint> = aggregates
        .iter()
        .map(|agg| {
            let image_login = if agg.author.contains(BOT_MARKER) {
                BOT_AVATAR_LOGIN
            } else {
                agg.author.as_str()
            };

            ChartPoint {
                x: days_from_today(agg.updated_at),
                y: agg.lines_changed,
                contributor: agg.author.clone(),
                image: avatar_url(image_login, AVATAR_SIZE),
            }
        })
        .collect();

    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);

    ChartData { points, max_y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_aggregate(author: &str, days_ago: i64, lines_changed: u64) -> ContributorAggregate {
        ContributorAggregate {
            author: author.to_string(),
            updated_at: Utc::now() - Duration::days(days_ago),
            lines_changed,
        }
    }

    #[test]
    fn test_empty_aggregates_yield_empty_chart() {
        let chart = project(&[]);
        assert!(chart.points.is_empty());
        assert_eq!(chart.max_y, 0);
    }

    #[test]
    fn test_point_axes_from_aggregate() {
        let chart = project(&[create_aggregate("alice", 3, 42)]);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].x, 3);
        assert_eq!(chart.points[0].y, 42);
        assert_eq!(chart.points[0].contributor, "alice");
        assert_eq!(chart.points[0].image, "https://github.com/alice.png?size=40");
    }

    #[test]
    fn test_max_y_is_maximum_across_points() {
        let chart = project(&[
            create_aggregate("alice", 1, 10),
            create_aggregate("bob", 2, 250),
            create_aggregate("carol", 3, 4),
        ]);
        assert_eq!(chart.max_y, 250);
    }

    #[test]
    fn test_bot_points_use_placeholder_avatar() {
        let chart = project(&[create_aggregate("dependabot[bot]", 1, 9)]);
        assert_eq!(chart.points[0].contributor, "dependabot[bot]");
        assert_eq!(
            chart.points[0].image,
            "https://github.com/octocat.png?size=40"
        );
    }

    #[test]
    fn test_days_from_today_truncates_to_whole_days() {
        let ts = Utc::now() - Duration::days(5) - Duration::hours(3);
        assert_eq!(days_from_today(ts), 5);
    }

    #[test]
    fn test_days_from_today_clamps_future_timestamps() {
        let ts = Utc::now() + Duration::days(2);
        assert_eq!(days_from_today(ts), 0);
    }

    #[test]
    fn test_projection_preserves_line_totals() {
        let aggregates = vec![
            create_aggregate("alice", 1, 10),
            create_aggregate("bob", 2, 20),
        ];
        let chart = project(&aggregates);

        let total_y: u64 = chart.points.iter().map(|p| p.y).sum();
        let total_lines: u64 = aggregates.iter().map(|a| a.lines_changed).sum();
        assert_eq!(total_y, total_lines);
    }
}
