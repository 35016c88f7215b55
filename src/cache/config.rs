//! Cache configuration.

use std::{num::NonZeroUsize, time::Duration};

const DEFAULT_CAPACITY: usize = 64;
const DEFAULT_LEADERBOARD_TTL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of keys held before least-recently-used eviction.
    pub capacity: usize,
    /// Lifetime of the homepage leaderboard entry. Zero disables caching.
    pub leaderboard_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            leaderboard_ttl: Duration::from_secs(DEFAULT_LEADERBOARD_TTL_SECS),
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            capacity: settings.capacity.get(),
            leaderboard_ttl: settings.leaderboard_ttl,
        }
    }
}

impl CacheConfig {
    /// Capacity as `NonZeroUsize`, clamping to 1 if zero.
    pub fn capacity_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}
