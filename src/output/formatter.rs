use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::dashboard::{ChartData, ChartMetadata};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a login to fit available width, accounting for Unicode
fn truncate_login(login: &str, max_width: usize) -> String {
    let chars: Vec<char> = login.chars().collect();
    if chars.len() <= max_width {
        login.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut truncated: String = chars[..max_width - 1].iter().collect();
        truncated.push('…');
        truncated
    }
}

/// Render a proportional bar of `width` cells, filled by value/max
fn lines_bar(value: u64, max: u64, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * width as f64).round() as usize
    };
    let filled = filled.min(width);

    let mut bar = String::new();
    bar.push_str(&"█".repeat(filled));
    bar.push_str(&"░".repeat(width - filled));
    bar
}

/// Format recency in whole days, e.g. "today" or "12d ago"
fn format_recency(days: u64) -> String {
    if days == 0 {
        "today".to_string()
    } else {
        format!("{}d ago", days)
    }
}

/// Format the headline metadata counts as a single summary line
pub fn format_metadata(metadata: &ChartMetadata, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{} PRs | {} open | {} closed/merged",
            metadata.all_prs.bold(),
            metadata.open_prs.green(),
            metadata.closed_prs.magenta()
        )
    } else {
        format!(
            "{} PRs | {} open | {} closed/merged",
            metadata.all_prs, metadata.open_prs, metadata.closed_prs
        )
    }
}

/// Format the contributor distribution as an aligned table, one row per
/// chart point: index, contributor, lines bar, line count, recency.
pub fn format_contributor_table(chart: &ChartData, use_colors: bool) -> String {
    if chart.points.is_empty() {
        return "No contributors found.".to_string();
    }

    // Contributor column sized to content, bounded by terminal width
    let login_width = chart
        .points
        .iter()
        .map(|p| p.contributor.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(11, 30);
    let login_width = match get_terminal_width() {
        // 4 index + 14 bar + 8 lines + 10 recency + separators
        Some(w) => login_width.min(w.saturating_sub(40).max(8)),
        None => login_width,
    };

    let mut out = String::new();
    let header = format!(
        "{:<4} {:<login_width$} {:<12} {:>7} {:>9}",
        "#", "contributor", "", "lines", "updated"
    );
    if use_colors {
        out.push_str(&format!("{}", header.bold()));
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    for (idx, point) in chart.points.iter().enumerate() {
        // Pad before coloring: ANSI escapes would throw off the column widths
        let index = format!("{:<4}", format!("{}.", idx + 1));
        let login = format!(
            "{:<login_width$}",
            truncate_login(&point.contributor, login_width)
        );
        let bar = lines_bar(point.y, chart.max_y, 12);
        let lines = format!("{:>7}", point.y);
        let recency = format!("{:>9}", format_recency(point.x));

        if use_colors {
            out.push_str(&format!(
                "{} {} {} {} {}\n",
                index.dimmed(),
                login.yellow(),
                bar.cyan(),
                lines.bold(),
                recency
            ));
        } else {
            out.push_str(&format!("{} {} {} {} {}\n", index, login, bar, lines, recency));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::ChartPoint;

    fn chart_with(points: Vec<ChartPoint>) -> ChartData {
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
        ChartData { points, max_y }
    }

    fn point(contributor: &str, x: u64, y: u64) -> ChartPoint {
        ChartPoint {
            x,
            y,
            contributor: contributor.to_string(),
            image: format!("https://github.com/{}.png?size=40", contributor),
        }
    }

    #[test]
    fn test_empty_chart_message() {
        let out = format_contributor_table(&chart_with(vec![]), false);
        assert_eq!(out, "No contributors found.");
    }

    #[test]
    fn test_table_contains_each_contributor() {
        let chart = chart_with(vec![point("alice", 0, 10), point("bob", 3, 4)]);
        let out = format_contributor_table(&chart, false);
        assert!(out.contains("alice"));
        assert!(out.contains("bob"));
        assert!(out.contains("today"));
        assert!(out.contains("3d ago"));
    }

    #[test]
    fn test_lines_bar_scales_to_max() {
        assert_eq!(lines_bar(0, 10, 4), "░░░░");
        assert_eq!(lines_bar(10, 10, 4), "████");
        assert_eq!(lines_bar(5, 10, 4), "██░░");
        // Zero max means an empty bar, not a division crash
        assert_eq!(lines_bar(0, 0, 4), "░░░░");
    }

    #[test]
    fn test_truncate_login_unicode_safe() {
        assert_eq!(truncate_login("alice", 10), "alice");
        assert_eq!(truncate_login("alexandria", 5), "alex…");
    }

    #[test]
    fn test_metadata_line() {
        let metadata = ChartMetadata {
            all_prs: 5,
            open_prs: 2,
            closed_prs: 3,
        };
        assert_eq!(
            format_metadata(&metadata, false),
            "5 PRs | 2 open | 3 closed/merged"
        );
    }
}
