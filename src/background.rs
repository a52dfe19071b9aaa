//! Background score refresh.
//!
//! The refresh task is an explicit start/stop lifecycle around a spawned
//! loop: it runs only while the selection is non-empty, fetches on a fixed
//! interval (first tick immediately on start), and patches the selection
//! in place. A manual refresh can be triggered over a channel; a failed
//! fetch logs and skips the tick.

use crate::provider::ScoreProvider;
use crate::SharedDataHandle;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Buffer size for the manual refresh trigger channel.
const REFRESH_CHANNEL_BUFFER_SIZE: usize = 10;

/// Run one refresh tick: fetch all available games and reconcile them into
/// the current selection. Selection membership is never altered here.
pub async fn refresh_once(provider: &dyn ScoreProvider, shared: &SharedDataHandle) {
    match provider.available_games().await {
        Ok(fresh) => {
            let mut data = shared.write().await;
            let patched = data.store.reconcile(&fresh);
            data.last_refresh = Some(SystemTime::now());
            data.error_message = None;
            tracing::debug!(patched, "Refreshed selection scores");
        }
        Err(e) => {
            tracing::warn!("Score refresh failed: {:#}", e);
            let mut data = shared.write().await;
            data.error_message = Some(format!("Refresh failed: {:#}", e));
        }
    }
}

async fn refresh_loop(
    provider: Arc<dyn ScoreProvider>,
    shared: SharedDataHandle,
    interval_secs: u64,
    mut refresh_rx: mpsc::Receiver<()>,
) {
    let mut interval_timer = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    interval_timer.tick().await; // First tick completes immediately

    loop {
        refresh_once(provider.as_ref(), &shared).await;

        // Wait for either the interval timer or a manual refresh signal
        tokio::select! {
            _ = interval_timer.tick() => {}
            _ = refresh_rx.recv() => {}
        }
    }
}

/// Handle to the periodic refresh loop, started and stopped by the
/// dashboard as the selection becomes non-empty or empties.
pub struct RefreshTask {
    provider: Arc<dyn ScoreProvider>,
    shared: SharedDataHandle,
    interval_secs: u64,
    handle: Option<JoinHandle<()>>,
    refresh_tx: Option<mpsc::Sender<()>>,
}

impl RefreshTask {
    pub fn new(
        provider: Arc<dyn ScoreProvider>,
        shared: SharedDataHandle,
        interval_secs: u64,
    ) -> Self {
        RefreshTask {
            provider,
            shared,
            interval_secs,
            handle: None,
            refresh_tx: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn the loop if it is not already running. The first fetch fires
    /// immediately.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let (refresh_tx, refresh_rx) = mpsc::channel::<()>(REFRESH_CHANNEL_BUFFER_SIZE);
        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.shared);
        let interval_secs = self.interval_secs;
        self.handle = Some(tokio::spawn(async move {
            refresh_loop(provider, shared, interval_secs, refresh_rx).await;
        }));
        self.refresh_tx = Some(refresh_tx);
        tracing::debug!("Refresh task started");
    }

    /// Abort the loop. In-flight results are discarded with the task.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Refresh task stopped");
        }
        self.refresh_tx = None;
    }

    /// Keep the task's lifecycle in line with selection emptiness.
    pub fn set_active(&mut self, selection_non_empty: bool) {
        if selection_non_empty {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Request an immediate refresh, if the task is running. Dropped when
    /// the trigger buffer is full (a refresh is already pending).
    pub fn trigger(&self) {
        if let Some(tx) = &self.refresh_tx {
            let _ = tx.try_send(());
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::live_game;
    use crate::store::SelectionStore;
    use crate::{shared_handle, SharedDataHandle};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provider returning queued responses, counting calls.
    struct MockProvider {
        responses: Mutex<Vec<Result<Vec<crate::types::Game>>>>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(responses: Vec<Result<Vec<crate::types::Game>>>) -> Arc<Self> {
            Arc::new(MockProvider {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScoreProvider for MockProvider {
        async fn available_games(&self) -> Result<Vec<crate::types::Game>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Ok(Vec::new())
            } else {
                responses.remove(0)
            }
        }

        async fn game_by_id(&self, id: &str) -> Result<Option<crate::types::Game>> {
            let games = self.available_games().await?;
            Ok(games.into_iter().find(|game| game.id == id))
        }
    }

    fn shared_with(games: Vec<crate::types::Game>) -> SharedDataHandle {
        let mut store = SelectionStore::in_memory();
        for game in games {
            store.add(game);
        }
        shared_handle(store)
    }

    #[tokio::test]
    async fn refresh_once_patches_scores_and_records_time() {
        let shared = shared_with(vec![live_game("a")]);
        let mut fresh = live_game("a");
        fresh.home_team.score = "4".to_string();
        let provider = MockProvider::new(vec![Ok(vec![fresh])]);

        refresh_once(provider.as_ref(), &shared).await;

        let data = shared.read().await;
        assert_eq!(data.store.len(), 1);
        assert_eq!(data.store.games()[0].home_team.score, "4");
        assert!(data.last_refresh.is_some());
        assert!(data.error_message.is_none());
    }

    #[tokio::test]
    async fn refresh_once_preserves_membership() {
        let shared = shared_with(vec![live_game("a"), live_game("b")]);
        let provider = MockProvider::new(vec![Ok(vec![live_game("c")])]);

        refresh_once(provider.as_ref(), &shared).await;

        let data = shared.read().await;
        let ids: Vec<&str> = data.store.games().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn failed_tick_is_skipped_and_reported() {
        let shared = shared_with(vec![live_game("a")]);
        let provider = MockProvider::new(vec![Err(anyhow!("boom"))]);

        refresh_once(provider.as_ref(), &shared).await;

        let data = shared.read().await;
        assert_eq!(data.store.games()[0], live_game("a"));
        assert!(data.last_refresh.is_none());
        assert!(data.error_message.as_deref().unwrap().contains("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn task_fires_immediately_on_start() {
        let shared = shared_with(vec![live_game("a")]);
        let provider = MockProvider::new(Vec::new());
        let mut task = RefreshTask::new(provider.clone(), shared, 3600);

        task.start();
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        assert!(task.is_running());
        assert_eq!(provider.calls(), 1);
        task.stop();
        assert!(!task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_spawns_one_loop() {
        let shared = shared_with(vec![live_game("a")]);
        let provider = MockProvider::new(Vec::new());
        let mut task = RefreshTask::new(provider.clone(), shared, 3600);

        task.start();
        task.start();
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn inactive_task_never_fetches() {
        // Empty selection: set_active(false) keeps the loop down.
        let shared = shared_with(Vec::new());
        let provider = MockProvider::new(Vec::new());
        let mut task = RefreshTask::new(provider.clone(), Arc::clone(&shared), 30);

        task.set_active(!shared.read().await.store.is_empty());
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        assert!(!task.is_running());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_trigger_forces_an_extra_tick() {
        let shared = shared_with(vec![live_game("a")]);
        let provider = MockProvider::new(Vec::new());
        let mut task = RefreshTask::new(provider.clone(), shared, 3600);

        task.start();
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(provider.calls(), 1);

        task.trigger();
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert_eq!(provider.calls(), 2);
    }
}
