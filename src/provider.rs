/// Trait for score data providers, abstracting over the real ESPN client
/// and mock implementations used by tests.
use crate::types::Game;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ScoreProvider: Send + Sync {
    /// All live or soon-to-start games across configured leagues, sorted
    /// for display.
    async fn available_games(&self) -> Result<Vec<Game>>;

    /// A single game by id from the current available set.
    async fn game_by_id(&self, id: &str) -> Result<Option<Game>>;
}

#[async_trait]
impl ScoreProvider for crate::espn::Client {
    async fn available_games(&self) -> Result<Vec<Game>> {
        self.fetch_available_games().await
    }

    async fn game_by_id(&self, id: &str) -> Result<Option<Game>> {
        self.fetch_game_by_id(id).await
    }
}
