pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::JoinHandle;
use tokio::time::error::Elapsed;

use crate::fetch::FetchOutcome;

const FETCH_TIMEOUT_SECS: u64 = 30;

type FetchHandle = JoinHandle<Result<anyhow::Result<FetchOutcome>, Elapsed>>;

fn spawn_fetch(client: &octocrab::Octocrab, app: &App) -> FetchHandle {
    let client = client.clone();
    let repositories = app.config.repositories.clone();
    let verbose = app.verbose;

    tokio::spawn(async move {
        tokio::time::timeout(
            Duration::from_secs(FETCH_TIMEOUT_SECS),
            async move { crate::fetch::fetch_pull_requests(&client, &repositories, verbose).await },
        )
        .await
    })
}

pub async fn run_tui(mut app: App, client: octocrab::Octocrab) -> anyhow::Result<()> {
    // Detect the terminal background before entering the alternate screen;
    // the OSC query doesn't work once the TUI owns the terminal
    let theme = resolve_theme();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // Create event handler with tick rate and auto-refresh interval
    let refresh_secs = app.config.auto_refresh_interval.max(1);
    let mut events = EventHandler::new(250, refresh_secs); // 250ms tick, N-second refresh

    // Spawn initial fetch as background task
    let mut pending_fetch: Option<FetchHandle> = Some(spawn_fetch(&client, &app));
    app.is_loading = true;

    // Main loop
    loop {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, &mut app, &theme))?;

        // Handle events
        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
            Event::Refresh => {
                app.needs_refresh = true;
            }
        }

        // Check if background fetch has completed
        if let Some(handle) = &mut pending_fetch {
            if handle.is_finished() {
                let handle = pending_fetch.take().unwrap();
                match handle.await {
                    Ok(Ok(Ok(outcome))) => {
                        let FetchOutcome { records, warnings } = outcome;
                        let count = records.len();
                        app.set_records(records);
                        match warnings.first() {
                            Some(warning) => app.show_flash(warning.clone()),
                            None => app.show_flash(format!("Refreshed: {} PRs", count)),
                        }
                    }
                    // Any failed fetch falls back to an empty chart
                    Ok(Ok(Err(e))) => {
                        app.fetch_failed(format!("Fetch failed: {}", e));
                    }
                    Ok(Err(_elapsed)) => {
                        app.fetch_failed(format!(
                            "Refresh timed out ({}s). Press r to retry.",
                            FETCH_TIMEOUT_SECS
                        ));
                    }
                    Err(e) => {
                        app.fetch_failed(format!("Refresh task panicked: {}", e));
                    }
                }
                app.is_loading = false;
            }
        }

        // Spawn new refresh if needed and no fetch is pending
        if app.needs_refresh && pending_fetch.is_none() {
            app.needs_refresh = false;
            pending_fetch = Some(spawn_fetch(&client, &app));
            app.is_loading = true;
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Open contributor profile in browser
                KeyCode::Enter | KeyCode::Char('o') => {
                    if let Some(login) = app.selected_contributor() {
                        let login = login.to_string();
                        if let Err(e) = app.open_selected() {
                            app.show_flash(format!("Failed to open browser: {}", e));
                        } else {
                            app.show_flash(format!("Opened: {}", login));
                        }
                    }
                }

                // Cycle status filter (all -> open -> closed)
                KeyCode::Char('s') => {
                    app.cycle_status_filter();
                    app.show_flash(format!("Filter: {}", app.status_filter.label()));
                }

                // Toggle bot visibility
                KeyCode::Char('b') => {
                    app.toggle_bots();
                    let state = if app.show_bots { "shown" } else { "hidden" };
                    app.show_flash(format!("Bots {}", state));
                }

                // Refresh
                KeyCode::Char('r') => {
                    app.needs_refresh = true;
                    app.show_flash("Refreshing...".to_string());
                }

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
