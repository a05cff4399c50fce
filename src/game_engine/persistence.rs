//! Result storage and profile sync collaborators.
//!
//! The engine only talks to the two traits here. [`InMemoryResultStore`] is
//! the bundled store; real backends live with the application.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::{PersistenceError, SyncError};
use crate::game_engine::models::{GameResult, GameType, Grade};

/// Entries returned by [`ResultStore::daily_test_history`].
pub const DAILY_HISTORY_LIMIT: usize = 30;

/// Brain age reported to the profile when nothing has been scored.
pub const DEFAULT_PROFILE_BRAIN_AGE: u32 = 40;

/// Aggregates over results that carry a brain age.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub average_brain_age: Option<f64>,
    pub total_games: u32,
    /// Grade of the most recent such result.
    pub latest_grade: Option<Grade>,
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert_result(&self, result: GameResult) -> Result<(), PersistenceError>;

    /// Newest first, optionally narrowed to one game type.
    async fn recent_results(
        &self,
        game_type: Option<GameType>,
        limit: usize,
    ) -> Result<Vec<GameResult>, PersistenceError>;

    /// The daily test taken on `day` (UTC), if any.
    async fn daily_test_on(&self, day: NaiveDate) -> Result<Option<GameResult>, PersistenceError>;

    /// The last [`DAILY_HISTORY_LIMIT`] daily tests, newest first.
    async fn daily_test_history(&self) -> Result<Vec<GameResult>, PersistenceError>;

    /// Every daily test, oldest first. Feeds the brain age chart.
    async fn daily_test_timeline(&self) -> Result<Vec<GameResult>, PersistenceError>;

    /// Brain age of the most recent daily test.
    async fn last_brain_age(&self) -> Result<Option<u32>, PersistenceError>;

    async fn global_stats(&self) -> Result<GlobalStats, PersistenceError>;

    /// Delete every result except daily tests. Returns how many were removed.
    async fn clear_history(&self) -> Result<usize, PersistenceError>;
}

/// Avatar field of a profile merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarUpdate {
    Keep,
    Set(u32),
}

/// Fields merged into the remote profile. `None`/`Keep` leave the stored
/// value as it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub brain_age: u32,
    pub total_matches: u32,
    pub average_grade: Grade,
    pub avatar: AvatarUpdate,
}

impl ProfileUpdate {
    /// Stats-only update, leaving name and avatar untouched.
    pub fn from_stats(stats: &GlobalStats) -> ProfileUpdate {
        ProfileUpdate {
            name: None,
            brain_age: stats
                .average_brain_age
                .map(|a| a as u32)
                .unwrap_or(DEFAULT_PROFILE_BRAIN_AGE),
            total_matches: stats.total_games,
            average_grade: stats.latest_grade.unwrap_or(Grade::F),
            avatar: AvatarUpdate::Keep,
        }
    }
}

#[async_trait]
pub trait ProfileSync: Send + Sync {
    async fn is_signed_in(&self) -> bool;

    async fn upload_results(&self, results: &[GameResult]) -> Result<(), SyncError>;

    async fn merge_profile(&self, update: ProfileUpdate) -> Result<(), SyncError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    results: RwLock<Vec<GameResult>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }
}

fn newest_first(results: &[GameResult]) -> Vec<GameResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn insert_result(&self, result: GameResult) -> Result<(), PersistenceError> {
        self.results.write().await.push(result);
        Ok(())
    }

    async fn recent_results(
        &self,
        game_type: Option<GameType>,
        limit: usize,
    ) -> Result<Vec<GameResult>, PersistenceError> {
        let results = self.results.read().await;
        Ok(newest_first(&results)
            .into_iter()
            .filter(|r| game_type.map_or(true, |g| r.game_type == g))
            .take(limit)
            .collect())
    }

    async fn daily_test_on(&self, day: NaiveDate) -> Result<Option<GameResult>, PersistenceError> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .find(|r| r.game_type == GameType::DailyTest && r.date.date_naive() == day)
            .cloned())
    }

    async fn daily_test_history(&self) -> Result<Vec<GameResult>, PersistenceError> {
        let results = self.results.read().await;
        Ok(newest_first(&results)
            .into_iter()
            .filter(|r| r.game_type == GameType::DailyTest)
            .take(DAILY_HISTORY_LIMIT)
            .collect())
    }

    async fn daily_test_timeline(&self) -> Result<Vec<GameResult>, PersistenceError> {
        let results = self.results.read().await;
        let mut daily: Vec<GameResult> =
            results.iter().filter(|r| r.game_type == GameType::DailyTest).cloned().collect();
        daily.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(daily)
    }

    async fn last_brain_age(&self) -> Result<Option<u32>, PersistenceError> {
        let results = self.results.read().await;
        Ok(newest_first(&results)
            .into_iter()
            .filter(|r| r.game_type == GameType::DailyTest)
            .find_map(|r| r.brain_age))
    }

    async fn global_stats(&self) -> Result<GlobalStats, PersistenceError> {
        let results = self.results.read().await;
        let aged: Vec<GameResult> = newest_first(&results)
            .into_iter()
            .filter(|r| r.brain_age.is_some())
            .collect();
        let total: u32 = aged.iter().filter_map(|r| r.brain_age).sum();
        Ok(GlobalStats {
            average_brain_age: (!aged.is_empty()).then(|| total as f64 / aged.len() as f64),
            total_games: aged.len() as u32,
            latest_grade: aged.first().map(|r| r.grade),
        })
    }

    async fn clear_history(&self) -> Result<usize, PersistenceError> {
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|r| r.game_type == GameType::DailyTest);
        Ok(before - results.len())
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Best-effort persistence of finished sessions. Failures are logged and
/// swallowed; a session never fails because its result could not be saved.
#[derive(Clone)]
pub struct ResultRecorder {
    store: Arc<dyn ResultStore>,
    sync: Option<Arc<dyn ProfileSync>>,
}

impl ResultRecorder {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        ResultRecorder { store, sync: None }
    }

    pub fn with_sync(mut self, sync: Arc<dyn ProfileSync>) -> Self {
        self.sync = Some(sync);
        self
    }

    pub fn store(&self) -> &Arc<dyn ResultStore> {
        &self.store
    }

    /// Store `result`, then upload it and refresh the profile when signed in.
    /// Returns whether the local insert succeeded.
    #[instrument(skip_all, fields(game = %result.game_type.tag(), score = result.score))]
    pub async fn record(&self, result: GameResult) -> bool {
        if let Err(e) = self.store.insert_result(result.clone()).await {
            warn!(target: "persistence", error = %e, "failed to store result");
            return false;
        }
        debug!(target: "persistence", "result stored");

        let Some(sync) = &self.sync else {
            return true;
        };
        if !sync.is_signed_in().await {
            return true;
        }
        if let Err(e) = self.sync_profile(sync.as_ref(), &result).await {
            warn!(target: "persistence", error = %e, "profile sync failed");
        }
        true
    }

    async fn sync_profile(&self, sync: &dyn ProfileSync, result: &GameResult) -> Result<(), SyncError> {
        sync.upload_results(std::slice::from_ref(result)).await?;
        let stats = match self.store.global_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(target: "persistence", error = %e, "stats unavailable, syncing defaults");
                GlobalStats::default()
            }
        };
        sync.merge_profile(ProfileUpdate::from_stats(&stats)).await
    }
}
