//! Persisted game selection.
//!
//! The store owns the canonical copy of the user's selection: an ordered,
//! unique-by-id sequence of games, rewritten to a JSON file after every
//! mutation and rehydrated on startup. Storage problems never propagate:
//! a missing or malformed file yields an empty selection, and a failed
//! write leaves the in-memory selection authoritative.

use crate::types::Game;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

pub struct SelectionStore {
    games: Vec<Game>,
    path: Option<PathBuf>,
}

impl SelectionStore {
    /// Open the store at its default location under the XDG data home.
    pub fn open() -> Self {
        Self::at(default_path())
    }

    /// Open the store backed by a specific file.
    pub fn with_path(path: PathBuf) -> Self {
        Self::at(Some(path))
    }

    /// In-memory store with no backing file. Mutations skip persistence.
    pub fn in_memory() -> Self {
        Self::at(None)
    }

    fn at(path: Option<PathBuf>) -> Self {
        let games = path.as_deref().map(load_selection).unwrap_or_default();
        SelectionStore { games, path }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Ids currently in the selection, for membership checks.
    pub fn ids(&self) -> HashSet<String> {
        self.games.iter().map(|game| game.id.clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.games.iter().any(|game| game.id == id)
    }

    /// Append a game unless its id is already present. Returns whether the
    /// selection changed.
    pub fn add(&mut self, game: Game) -> bool {
        if self.contains(&game.id) {
            return false;
        }
        self.games.push(game);
        self.persist();
        true
    }

    /// Remove the entry with the given id. Returns whether the selection
    /// changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.games.len();
        self.games.retain(|game| game.id != id);
        if self.games.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Replace entries in place with fresh copies matched by id. Entries
    /// absent from `fresh` are left untouched; membership never changes.
    /// Returns how many entries were patched.
    pub fn reconcile(&mut self, fresh: &[Game]) -> usize {
        let mut patched = 0;
        for entry in &mut self.games {
            if let Some(update) = fresh.iter().find(|game| game.id == entry.id) {
                if entry != update {
                    *entry = update.clone();
                    patched += 1;
                }
            }
        }
        self.persist();
        patched
    }

    /// Rewrite the backing file with the full selection. Failures are
    /// logged and swallowed.
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("Failed to create data directory {}: {}", parent.display(), e);
                return;
            }
        }
        match serde_json::to_string(&self.games) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    tracing::warn!("Failed to save selection to {}: {}", path.display(), e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize selection: {}", e);
            }
        }
    }
}

fn default_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let data_home = xdg_dirs.get_data_home()?;
    Some(data_home.join("selection.json"))
}

fn load_selection(path: &std::path::Path) -> Vec<Game> {
    if !path.exists() {
        return Vec::new();
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read selection from {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match serde_json::from_str(&content) {
        Ok(games) => games,
        Err(e) => {
            tracing::warn!("Discarding malformed selection in {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
