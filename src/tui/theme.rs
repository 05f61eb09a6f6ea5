//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Scatter chart colors
    pub point_color: Color,
    pub bot_point_color: Color,
    pub axis_color: Color,
    pub axis_label: Color,

    // Metadata header colors
    pub count_all: Color,
    pub count_open: Color,
    pub count_closed: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    /// Dark terminal palette
    pub fn dark() -> Self {
        Self {
            point_color: Color::Cyan,
            bot_point_color: Color::Magenta,
            axis_color: Color::DarkGray,
            axis_label: Color::Gray,
            count_all: Color::White,
            count_open: Color::Green,
            count_closed: Color::Magenta,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light terminal palette
    pub fn light() -> Self {
        Self {
            point_color: Color::Blue,
            bot_point_color: Color::Magenta,
            axis_color: Color::Gray,
            axis_label: Color::DarkGray,
            count_all: Color::Black,
            count_open: Color::Green,
            count_closed: Color::Magenta,
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Gray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            status_key_color: Color::Blue,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }
}

/// Pick a palette for the terminal's detected background. Detection
/// failures (pipes, unsupported terminals) fall back to dark.
pub fn resolve_theme() -> ThemeColors {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeColors::light(),
        _ => ThemeColors::dark(),
    }
}
