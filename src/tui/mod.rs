// Module declarations
pub mod app;
pub mod widgets;

pub use app::{key_to_action, Action, App, ModalState};

use crate::background::RefreshTask;
use crate::config::{Config, DisplayConfig};
use crate::provider::ScoreProvider;
use crate::tui::widgets::{
    EmptyState, GameGrid, ModalRow, RenderableWidget, SelectionModal, StatusBar,
};
use crate::types::Game;
use crate::SharedDataHandle;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;

/// How long one loop iteration waits for a key event before redrawing.
const INPUT_POLL_MS: u64 = 250;

/// Rows reserved for the status bar at the bottom of the screen.
const STATUS_BAR_HEIGHT: u16 = 2;

/// Read-only view of the shared state taken once per frame, so rendering
/// never holds the lock.
struct ViewSnapshot {
    games: Vec<Game>,
    selected_ids: HashSet<String>,
    last_refresh: Option<SystemTime>,
    error_message: Option<String>,
}

/// Main entry point for TUI mode
pub async fn run(
    shared: SharedDataHandle,
    provider: Arc<dyn ScoreProvider>,
    config: Config,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut refresh_task = RefreshTask::new(
        Arc::clone(&provider),
        Arc::clone(&shared),
        config.refresh_interval as u64,
    );
    // A selection restored from disk starts refreshing right away.
    refresh_task.set_active(!shared.read().await.store.is_empty());

    let result = main_loop(
        &mut terminal,
        &shared,
        &provider,
        &mut refresh_task,
        &config,
    )
    .await;

    // Restore terminal
    refresh_task.stop();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shared: &SharedDataHandle,
    provider: &Arc<dyn ScoreProvider>,
    refresh_task: &mut RefreshTask,
    config: &Config,
) -> Result<(), io::Error> {
    let display = config.display();
    let mut app = App::new();
    let (modal_tx, mut modal_rx) = mpsc::unbounded_channel::<anyhow::Result<Vec<Game>>>();

    loop {
        // Deliver finished modal fetches before drawing
        while let Ok(fetch_result) = modal_rx.try_recv() {
            app.apply_modal_result(fetch_result);
        }

        let snapshot = {
            let data = shared.read().await;
            ViewSnapshot {
                games: data.store.games().to_vec(),
                selected_ids: data.store.ids(),
                last_refresh: data.last_refresh,
                error_message: data.error_message.clone(),
            }
        };
        app.clamp_focus(snapshot.games.len());

        terminal.draw(|f| {
            app.cards_per_row = widgets::cards_per_row(f.area().width);
            render(f, &app, &snapshot, &display, config.refresh_interval);
        })?;

        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = key_to_action(key, app.modal_open()) else {
            continue;
        };

        match action {
            Action::Quit => break,
            Action::OpenModal => {
                app.open_modal();
                spawn_modal_fetch(provider, &modal_tx);
            }
            Action::RetryFetch => {
                if app.retry() {
                    spawn_modal_fetch(provider, &modal_tx);
                }
            }
            Action::CloseModal => app.close_modal(),
            Action::Confirm => confirm_selection(&mut app, shared, refresh_task).await,
            Action::RemoveFocused => remove_focused(&mut app, shared, refresh_task).await,
            Action::ManualRefresh => refresh_task.trigger(),
            movement => app.apply_movement(movement, snapshot.games.len()),
        }
    }

    Ok(())
}

/// Fetch the available games off the UI loop; the result is delivered over
/// the channel and dropped there if the modal has moved on.
fn spawn_modal_fetch(
    provider: &Arc<dyn ScoreProvider>,
    modal_tx: &mpsc::UnboundedSender<anyhow::Result<Vec<Game>>>,
) {
    let provider = Arc::clone(provider);
    let modal_tx = modal_tx.clone();
    tokio::spawn(async move {
        let _ = modal_tx.send(provider.available_games().await);
    });
}

/// Add the game under the modal cursor, unless it is already selected.
async fn confirm_selection(app: &mut App, shared: &SharedDataHandle, refresh_task: &mut RefreshTask) {
    let ModalState::Loaded(games) = &app.modal else {
        return;
    };
    let Some(game) = games.get(app.modal_cursor).cloned() else {
        return;
    };

    let added = {
        let mut data = shared.write().await;
        data.store.add(game)
    };
    if added {
        app.close_modal();
        refresh_task.set_active(true);
    }
}

/// Remove the focused card and wind the refresh task down if the selection
/// emptied.
async fn remove_focused(app: &mut App, shared: &SharedDataHandle, refresh_task: &mut RefreshTask) {
    let selection_non_empty = {
        let mut data = shared.write().await;
        let id = data
            .store
            .games()
            .get(app.focused_card)
            .map(|game| game.id.clone());
        if let Some(id) = id {
            data.store.remove(&id);
        }
        !data.store.is_empty()
    };
    refresh_task.set_active(selection_non_empty);
}

fn render(
    f: &mut Frame,
    app: &App,
    snapshot: &ViewSnapshot,
    display: &DisplayConfig,
    refresh_interval: u32,
) {
    let area = f.area();
    let buf = f.buffer_mut();

    let body = ratatui::layout::Rect {
        height: area.height.saturating_sub(STATUS_BAR_HEIGHT),
        ..area
    };
    if snapshot.games.is_empty() {
        EmptyState::new().render(body, buf, display);
    } else {
        GameGrid::new(snapshot.games.clone(), app.focused_card).render(body, buf, display);
    }

    // Last-updated clock only while something is being tracked
    let last_updated = if snapshot.games.is_empty() {
        None
    } else {
        snapshot
            .last_refresh
            .map(|t| widgets::status_bar::format_refresh_time(t, &display.time_format))
    };
    let bar_area = ratatui::layout::Rect {
        y: area.y + area.height.saturating_sub(STATUS_BAR_HEIGHT),
        height: STATUS_BAR_HEIGHT.min(area.height),
        ..area
    };
    StatusBar::new()
        .with_last_updated(last_updated)
        .with_last_refresh(if snapshot.games.is_empty() {
            None
        } else {
            snapshot.last_refresh
        })
        .with_refresh_interval(refresh_interval)
        .with_error(snapshot.error_message.clone())
        .render(bar_area, buf, display);

    // Modal overlay
    match &app.modal {
        ModalState::Closed => {}
        ModalState::Loading => SelectionModal::loading().render(area, buf, display),
        ModalState::Error(message) => {
            SelectionModal::error(message.clone()).render(area, buf, display)
        }
        ModalState::Loaded(games) => {
            let rows = games
                .iter()
                .map(|game| ModalRow {
                    game: game.clone(),
                    already_added: snapshot.selected_ids.contains(&game.id),
                })
                .collect();
            SelectionModal::games(rows, app.modal_cursor).render(area, buf, display);
        }
    }
}
