use std::time::Instant;

use crate::config::Config;
use crate::dashboard::{compute_metadata, derive_chart, ChartData, ChartMetadata, StatusFilter};
use crate::github::types::{PullRequest, BOT_MARKER};

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    /// Immutable snapshot of the last successful fetch
    pub records: Vec<PullRequest>,
    /// Headline counts over the full snapshot, fixed until the next fetch
    pub metadata: ChartMetadata,
    /// Chart derived from the snapshot and the current toggles
    pub chart: ChartData,

    pub status_filter: StatusFilter,
    pub show_bots: bool,

    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub last_refresh: Instant,
    pub needs_refresh: bool,
    pub should_quit: bool,
    pub config: Config,
    pub verbose: bool,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl App {
    /// Create an App in loading state, before any data has arrived
    pub fn new(config: Config, verbose: bool) -> Self {
        let show_bots = config.show_bots;
        Self {
            records: Vec::new(),
            metadata: ChartMetadata::default(),
            chart: ChartData::default(),
            status_filter: StatusFilter::All,
            show_bots,
            table_state: ratatui::widgets::TableState::default(),
            input_mode: InputMode::Normal,
            flash_message: None,
            last_refresh: Instant::now(),
            needs_refresh: false,
            should_quit: false,
            config,
            verbose,
            is_loading: true,
            spinner_frame: 0,
        }
    }

    /// Install a freshly fetched snapshot. Metadata is computed here, once
    /// per snapshot; toggle changes later only re-derive the chart.
    pub fn set_records(&mut self, records: Vec<PullRequest>) {
        self.metadata = compute_metadata(&records);
        self.records = records;
        self.last_refresh = Instant::now();
        self.recompute();
    }

    /// Record a failed fetch: drop the snapshot and surface the reason.
    /// Timeouts and panicked fetch tasks count as failures too - the
    /// dashboard never keeps stale points after a fetch that didn't land.
    pub fn fetch_failed(&mut self, message: String) {
        self.clear_records();
        self.show_flash(message);
    }

    /// Drop the snapshot after a failed fetch: empty chart, zero counts
    pub fn clear_records(&mut self) {
        self.records.clear();
        self.metadata = ChartMetadata::default();
        self.last_refresh = Instant::now();
        self.recompute();
    }

    /// Re-run aggregation and projection against the current snapshot
    fn recompute(&mut self) {
        self.chart = derive_chart(&self.records, self.status_filter, self.show_bots);
        self.clamp_selection();
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.recompute();
    }

    pub fn toggle_bots(&mut self) {
        self.show_bots = !self.show_bots;
        self.recompute();
    }

    fn clamp_selection(&mut self) {
        if self.chart.points.is_empty() {
            self.table_state.select(None);
        } else {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state
                .select(Some(i.min(self.chart.points.len() - 1)));
        }
    }

    pub fn next_row(&mut self) {
        let len = self.chart.points.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.chart.points.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_contributor(&self) -> Option<&str> {
        let i = self.table_state.selected()?;
        self.chart.points.get(i).map(|p| p.contributor.as_str())
    }

    /// Open the selected contributor's GitHub profile in the browser.
    /// Bot logins map to their app page ("dependabot[bot]" -> apps/dependabot).
    pub fn open_selected(&self) -> anyhow::Result<()> {
        let login = self
            .selected_contributor()
            .ok_or_else(|| anyhow::anyhow!("No contributor selected"))?;

        let url = match login.strip_suffix(BOT_MARKER) {
            Some(app_name) => format!("https://github.com/apps/{}", app_name),
            None => format!("https://github.com/{}", login),
        };
        crate::browser::open_url(&url)
    }

    pub fn show_flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, shown_at)) = &self.flash_message {
            if shown_at.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn advance_spinner(&mut self) {
        if self.is_loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
