//! Dashboard application state and key handling.
//!
//! `App` holds only UI state (modal state machine, card focus, modal
//! cursor); the selection itself lives in the shared store. Key events map
//! to `Action`s through a pure function so the bindings are testable.

use crate::types::Game;
use crossterm::event::{KeyCode, KeyEvent};

/// Selection modal state machine. The modal re-fetches on every open; a
/// result arriving while the modal is not `Loading` is stale and dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Loading,
    Loaded(Vec<Game>),
    Error(String),
}

/// User intent derived from a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    OpenModal,
    CloseModal,
    RetryFetch,
    Confirm,
    RemoveFocused,
    ManualRefresh,
    FocusLeft,
    FocusRight,
    FocusUp,
    FocusDown,
    CursorUp,
    CursorDown,
}

/// Map a key press to an action. Bindings differ between the dashboard
/// and the open modal.
pub fn key_to_action(key: KeyEvent, modal_open: bool) -> Option<Action> {
    if modal_open {
        match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
            KeyCode::Char('r') => Some(Action::RetryFetch),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    } else {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('a') => Some(Action::OpenModal),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveFocused),
            KeyCode::Char('r') => Some(Action::ManualRefresh),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::FocusLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::FocusRight),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::FocusUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusDown),
            _ => None,
        }
    }
}

pub struct App {
    pub modal: ModalState,
    /// Index of the focused card on the dashboard grid.
    pub focused_card: usize,
    /// Cursor row inside the open modal.
    pub modal_cursor: usize,
    /// Cards per grid row, updated from the terminal width on each draw.
    pub cards_per_row: usize,
}

impl App {
    pub fn new() -> Self {
        App {
            modal: ModalState::Closed,
            focused_card: 0,
            modal_cursor: 0,
            cards_per_row: 1,
        }
    }

    pub fn modal_open(&self) -> bool {
        self.modal != ModalState::Closed
    }

    /// Enter the loading state. The caller starts the fetch.
    pub fn open_modal(&mut self) {
        self.modal = ModalState::Loading;
        self.modal_cursor = 0;
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Re-enter loading from the error state. Returns whether a new fetch
    /// should start.
    pub fn retry(&mut self) -> bool {
        if matches!(self.modal, ModalState::Error(_)) {
            self.modal = ModalState::Loading;
            self.modal_cursor = 0;
            true
        } else {
            false
        }
    }

    /// Accept a fetch result, unless the modal moved on while the fetch
    /// was in flight.
    pub fn apply_modal_result(&mut self, result: anyhow::Result<Vec<Game>>) {
        if self.modal != ModalState::Loading {
            return;
        }
        self.modal = match result {
            Ok(games) => ModalState::Loaded(games),
            Err(e) => ModalState::Error(format!("Failed to load games: {:#}", e)),
        };
    }

    /// Number of rows in the open modal list.
    pub fn modal_len(&self) -> usize {
        match &self.modal {
            ModalState::Loaded(games) => games.len(),
            _ => 0,
        }
    }

    /// Apply a movement action to the card focus or the modal cursor.
    pub fn apply_movement(&mut self, action: Action, card_count: usize) {
        match action {
            Action::CursorUp => {
                self.modal_cursor = self.modal_cursor.saturating_sub(1);
            }
            Action::CursorDown => {
                let len = self.modal_len();
                if len > 0 && self.modal_cursor + 1 < len {
                    self.modal_cursor += 1;
                }
            }
            Action::FocusLeft => {
                self.focused_card = self.focused_card.saturating_sub(1);
            }
            Action::FocusRight => {
                if card_count > 0 && self.focused_card + 1 < card_count {
                    self.focused_card += 1;
                }
            }
            Action::FocusUp => {
                self.focused_card = self.focused_card.saturating_sub(self.cards_per_row.max(1));
            }
            Action::FocusDown => {
                let next = self.focused_card + self.cards_per_row.max(1);
                if next < card_count {
                    self.focused_card = next;
                }
            }
            _ => {}
        }
    }

    /// Keep the card focus valid after removals or refreshes.
    pub fn clamp_focus(&mut self, card_count: usize) {
        if card_count == 0 {
            self.focused_card = 0;
        } else if self.focused_card >= card_count {
            self.focused_card = card_count - 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
