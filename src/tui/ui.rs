use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
};

use crate::github::types::BOT_MARKER;
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &mut App, theme: &ThemeColors) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Stats(1) + Chart(60%) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),      // Title bar
        Constraint::Length(1),      // Stats header
        Constraint::Percentage(55), // Scatter chart
        Constraint::Fill(1),        // Contributor table
        Constraint::Length(1),      // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app, theme);
    render_stats(frame, chunks[1], app, theme);
    render_chart(frame, chunks[2], app, theme);
    render_table(frame, chunks[3], app, theme);
    render_status_bar(frame, chunks[4], app, theme);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, theme);
    }

    // Loading overlay appears on top of everything
    if app.is_loading {
        render_loading_overlay(frame, app, theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let mut spans = vec![Span::styled(
        "PR Pulse",
        Style::default().fg(theme.title_color).bold(),
    )];

    // Repo list on the right
    let repos = app.config.repositories.join(", ");
    let left_len = "PR Pulse".len();
    let right_len = repos.chars().count();
    if right_len > 0 && left_len + right_len < area.width as usize {
        let padding_len = (area.width as usize).saturating_sub(left_len + right_len);
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(repos, Style::default().fg(theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let metadata = &app.metadata;
    let line = Line::from(vec![
        Span::styled(
            format!("{} PRs", metadata.all_prs),
            Style::default().fg(theme.count_all).bold(),
        ),
        Span::styled(" | ", Style::default().fg(theme.muted)),
        Span::styled(
            format!("{} open", metadata.open_prs),
            Style::default().fg(theme.count_open),
        ),
        Span::styled(" | ", Style::default().fg(theme.muted)),
        Span::styled(
            format!("{} closed/merged", metadata.closed_prs),
            Style::default().fg(theme.count_closed),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_chart(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let points = &app.chart.points;

    if points.is_empty() {
        let empty_msg = Paragraph::new("No contributors to chart")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Contributor Distribution")
                    .border_style(Style::default().fg(theme.axis_color)),
            );
        frame.render_widget(empty_msg, area);
        return;
    }

    // Axis bounds with a little headroom so edge points stay visible
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0).max(1) as f64 * 1.05;
    let max_y = (app.chart.max_y.max(1) as f64) * 1.1;

    let human_data: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| !p.contributor.contains(BOT_MARKER))
        .map(|p| (p.x as f64, p.y as f64))
        .collect();
    let bot_data: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.contributor.contains(BOT_MARKER))
        .map(|p| (p.x as f64, p.y as f64))
        .collect();
    let selected_data: Vec<(f64, f64)> = app
        .table_state
        .selected()
        .and_then(|i| points.get(i))
        .map(|p| vec![(p.x as f64, p.y as f64)])
        .unwrap_or_default();

    let mut datasets = vec![
        Dataset::default()
            .name("contributors")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme.point_color))
            .data(&human_data),
        Dataset::default()
            .name("bots")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme.bot_point_color))
            .data(&bot_data),
    ];
    if !selected_data.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme.title_color))
                .data(&selected_data),
        );
    }

    let x_labels = vec![
        Span::styled("today", Style::default().fg(theme.axis_label)),
        Span::styled(
            format!("{}d", (max_x / 2.0).round() as u64),
            Style::default().fg(theme.axis_label),
        ),
        Span::styled(
            format!("{}d", max_x.round() as u64),
            Style::default().fg(theme.axis_label),
        ),
    ];
    let y_labels = vec![
        Span::styled("0", Style::default().fg(theme.axis_label)),
        Span::styled(
            format!("{}", (max_y / 2.0).round() as u64),
            Style::default().fg(theme.axis_label),
        ),
        Span::styled(
            format!("{}", max_y.round() as u64),
            Style::default().fg(theme.axis_label),
        ),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Contributor Distribution")
                .border_style(Style::default().fg(theme.axis_color)),
        )
        .x_axis(
            Axis::default()
                .title("days since last update")
                .style(Style::default().fg(theme.axis_color))
                .labels(x_labels)
                .bounds([0.0, max_x]),
        )
        .y_axis(
            Axis::default()
                .title("lines changed")
                .style(Style::default().fg(theme.axis_color))
                .labels(y_labels)
                .bounds([0.0, max_y]),
        );

    frame.render_widget(chart, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App, theme: &ThemeColors) {
    let points = &app.chart.points;

    if points.is_empty() {
        let empty_msg = Paragraph::new("No contributors match the current filters")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let index = format!("{}.", idx + 1);
            let recency = if point.x == 0 {
                "today".to_string()
            } else {
                format!("{}d ago", point.x)
            };

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(theme.index_color)),
                Cell::from(point.contributor.clone()),
                Cell::from(format!("{}", point.y)),
                Cell::from(recency),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Fill(1),    // Contributor login
        Constraint::Length(10), // Lines changed
        Constraint::Length(10), // Recency
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Contributor", "Lines", "Updated"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let line = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed")
            || msg.starts_with("Fetch failed")
            || msg.starts_with("Refresh timed out")
            || msg.starts_with("Refresh task panicked")
        {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let refreshed = humantime::format_duration(std::time::Duration::from_secs(
            app.last_refresh.elapsed().as_secs(),
        ));
        let bots = if app.show_bots { "shown" } else { "hidden" };

        Line::from(vec![
            Span::styled("s", Style::default().fg(theme.status_key_color).bold()),
            Span::styled(
                format!(" filter: {}  ", app.status_filter.label()),
                Style::default().fg(theme.muted),
            ),
            Span::styled("b", Style::default().fg(theme.status_key_color).bold()),
            Span::styled(format!(" bots: {}  ", bots), Style::default().fg(theme.muted)),
            Span::styled("r", Style::default().fg(theme.status_key_color).bold()),
            Span::styled(" refresh  ", Style::default().fg(theme.muted)),
            Span::styled("?", Style::default().fg(theme.status_key_color).bold()),
            Span::styled(" help  ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("refreshed {} ago", refreshed),
                Style::default().fg(theme.muted),
            ),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let area = centered_rect(44, 13, frame.area());

    let help_text = vec![
        Line::from(""),
        Line::from("  j/k or ↑/↓   navigate contributors"),
        Line::from("  Enter or o   open GitHub profile"),
        Line::from("  s            cycle status filter"),
        Line::from("  b            toggle bot accounts"),
        Line::from("  r            refresh data"),
        Line::from("  ?            toggle this help"),
        Line::from("  q            quit"),
        Line::from(""),
        Line::from("  Press any key to close"),
    ];

    let popup = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Help ", theme.popup_title))
            .border_style(Style::default().fg(theme.popup_border))
            .style(Style::default().bg(theme.popup_bg)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn render_loading_overlay(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let area = centered_rect(30, 3, frame.area());
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];

    let popup = Paragraph::new(format!("{} Fetching pull requests...", spinner))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.popup_border))
                .style(Style::default().bg(theme.popup_bg)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Center a fixed-size rect inside `r`, clamped to its bounds
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
