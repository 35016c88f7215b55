//! Cache-aside read of the homepage loyalty leaderboard.

use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::application::repos::{RepoError, UsersRepo};
use crate::cache::{CacheBackend, CacheConfig};
use crate::domain::leaderboard::{LeaderboardEntry, LeaderboardQuery, rank};

/// Cache key shared by every process reading the leaderboard.
pub const LEADERBOARD_CACHE_KEY: &str = "homepage_leaderboard_users_v1";

const SOURCE: &str = "application::leaderboard::LeaderboardService";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardSource {
    Cache,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRead {
    pub entries: Vec<LeaderboardEntry>,
    pub source: LeaderboardSource,
}

#[derive(Clone)]
pub struct LeaderboardService {
    cache: Arc<dyn CacheBackend>,
    users: Arc<dyn UsersRepo>,
    ttl: Duration,
    query: LeaderboardQuery,
}

impl LeaderboardService {
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        users: Arc<dyn UsersRepo>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            cache,
            users,
            ttl: config.leaderboard_ttl,
            query: LeaderboardQuery::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Ranked entries, served from the cache when a decodable entry exists.
    pub async fn top_users(&self) -> Result<Vec<LeaderboardEntry>, RepoError> {
        self.read().await.map(|read| read.entries)
    }

    pub async fn read(&self) -> Result<LeaderboardRead, RepoError> {
        if let Some(entries) = self.cached().await {
            return Ok(LeaderboardRead {
                entries,
                source: LeaderboardSource::Cache,
            });
        }

        let users = self.users.list_leaderboard(&self.query).await?;
        let entries = rank(&self.query, users);
        self.write_back(&entries).await;

        Ok(LeaderboardRead {
            entries,
            source: LeaderboardSource::Store,
        })
    }

    async fn cached(&self) -> Option<Vec<LeaderboardEntry>> {
        let payload = match self.cache.get(LEADERBOARD_CACHE_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(target = SOURCE, key = LEADERBOARD_CACHE_KEY, "leaderboard cache miss");
                return None;
            }
            Err(err) => {
                warn!(
                    target = SOURCE,
                    key = LEADERBOARD_CACHE_KEY,
                    error = %err,
                    "leaderboard cache read failed; treating as miss"
                );
                return None;
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&payload) {
            Ok(entries) => Some(entries),
            Err(err) => {
                warn!(
                    target = SOURCE,
                    key = LEADERBOARD_CACHE_KEY,
                    error = %err,
                    "cached leaderboard could not be decoded; treating as miss"
                );
                None
            }
        }
    }

    async fn write_back(&self, entries: &[LeaderboardEntry]) {
        let payload = match serde_json::to_string(entries) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(target = SOURCE, error = %err, "failed to encode leaderboard for caching");
                return;
            }
        };

        if let Err(err) = self
            .cache
            .set(LEADERBOARD_CACHE_KEY, payload, self.ttl)
            .await
        {
            warn!(
                target = SOURCE,
                key = LEADERBOARD_CACHE_KEY,
                error = %err,
                "leaderboard cache write failed"
            );
        }
    }
}
