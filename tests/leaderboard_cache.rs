mod support;

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use support::{FakeStore, Script, customer, user};
use time::macros::datetime;
use zorpido::{
    application::leaderboard::{LEADERBOARD_CACHE_KEY, LeaderboardService, LeaderboardSource},
    cache::{CacheBackend, CacheConfig, CacheError, Clock, ManualClock, MemoryCache},
    domain::{leaderboard::LeaderboardEntry, types::UserType},
};

fn config(ttl_secs: u64) -> CacheConfig {
    CacheConfig {
        leaderboard_ttl: Duration::from_secs(ttl_secs),
        ..Default::default()
    }
}

fn ids(entries: &[LeaderboardEntry]) -> Vec<i64> {
    entries.iter().map(|entry| entry.id).collect()
}

/// Cache whose reads and writes can be made to fail independently.
#[derive(Default)]
struct FlakyCache {
    fail_reads: bool,
    fail_writes: bool,
    writes: AtomicUsize,
}

#[async_trait]
impl CacheBackend for FlakyCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        if self.fail_reads {
            Err(CacheError::unavailable("connection refused"))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            Err(CacheError::unavailable("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn ranks_customers_and_caches_the_result() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![
            user(2, 80, UserType::Customer, true),
            user(3, 10, UserType::Customer, true),
            user(4, 99, UserType::Staff, true),
        ]),
        ..Default::default()
    });
    let config = config(60);
    let cache = Arc::new(MemoryCache::new(&config));
    let service = LeaderboardService::new(cache.clone(), store.clone(), &config);

    let read = service.read().await.expect("leaderboard");
    assert_eq!(read.source, LeaderboardSource::Store);
    assert_eq!(ids(&read.entries), vec![2, 3]);

    let payload = cache
        .get(LEADERBOARD_CACHE_KEY)
        .await
        .expect("cache read")
        .expect("leaderboard cached");
    let cached: Vec<LeaderboardEntry> = serde_json::from_str(&payload).expect("decodable payload");
    assert_eq!(cached, read.entries);
}

#[tokio::test]
async fn populated_entry_is_returned_verbatim() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(9, 999)]),
        ..Default::default()
    });
    let config = config(60);
    let cache = Arc::new(MemoryCache::new(&config));
    let seeded = vec![LeaderboardEntry {
        id: 1,
        username: "asha".to_string(),
        full_name: "Asha Rai".to_string(),
        profile_picture: None,
        loyalty_points: 50,
    }];
    cache
        .set(
            LEADERBOARD_CACHE_KEY,
            serde_json::to_string(&seeded).expect("encode"),
            config.leaderboard_ttl,
        )
        .await
        .expect("seed cache");
    let service = LeaderboardService::new(cache, store.clone(), &config);

    let read = service.read().await.expect("leaderboard");

    assert_eq!(read.source, LeaderboardSource::Cache);
    assert_eq!(read.entries, seeded);
    assert_eq!(store.user_calls(), 0);
}

#[tokio::test]
async fn cache_hit_does_not_touch_the_store() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(1, 50), customer(2, 70)]),
        ..Default::default()
    });
    let service = support::leaderboard(&store, &config(60));

    let first = service.read().await.expect("first read");
    let second = service.read().await.expect("second read");

    assert_eq!(first.source, LeaderboardSource::Store);
    assert_eq!(second.source, LeaderboardSource::Cache);
    assert_eq!(first.entries, second.entries);
    assert_eq!(store.user_calls(), 1);
}

#[tokio::test]
async fn expired_entry_is_recomputed() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(1, 50)]),
        ..Default::default()
    });
    let config = config(60);
    let manual = Arc::new(ManualClock::new(datetime!(2025-03-01 08:00 UTC)));
    let clock: Arc<dyn Clock> = manual.clone();
    let cache = Arc::new(MemoryCache::with_clock(&config, clock));
    let service = LeaderboardService::new(cache, store.clone(), &config);

    service.read().await.expect("initial read");

    manual.advance(Duration::from_secs(59));
    let fresh = service.read().await.expect("read before expiry");
    assert_eq!(fresh.source, LeaderboardSource::Cache);
    assert_eq!(store.user_calls(), 1);

    manual.advance(Duration::from_secs(1));
    let stale = service.read().await.expect("read at expiry");
    assert_eq!(stale.source, LeaderboardSource::Store);
    assert_eq!(store.user_calls(), 2);
}

#[tokio::test]
async fn leaderboard_is_capped_at_twenty() {
    let store = Arc::new(FakeStore {
        users: Script::Rows((1..=30).map(|id| customer(id, id as i32 * 10)).collect()),
        ..Default::default()
    });
    let service = support::leaderboard(&store, &config(60));

    let entries = service.top_users().await.expect("leaderboard");

    assert_eq!(entries.len(), 20);
    assert_eq!(entries.first().map(|entry| entry.id), Some(30));
    assert_eq!(entries.last().map(|entry| entry.id), Some(11));
    assert!(
        entries
            .windows(2)
            .all(|pair| pair[0].loyalty_points >= pair[1].loyalty_points)
    );
}

#[tokio::test]
async fn zero_ttl_disables_caching() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(1, 50)]),
        ..Default::default()
    });
    let config = config(0);
    let cache = Arc::new(MemoryCache::new(&config));
    let service = LeaderboardService::new(cache.clone(), store.clone(), &config);

    service.read().await.expect("first read");
    let second = service.read().await.expect("second read");

    assert_eq!(second.source, LeaderboardSource::Store);
    assert_eq!(store.user_calls(), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn unreadable_cache_falls_through_to_the_store() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(1, 50), customer(2, 60)]),
        ..Default::default()
    });
    let cache = Arc::new(FlakyCache {
        fail_reads: true,
        fail_writes: true,
        ..Default::default()
    });
    let service = LeaderboardService::new(cache.clone(), store.clone(), &config(60));

    for _ in 0..2 {
        let read = service.read().await.expect("read despite cache outage");
        assert_eq!(read.source, LeaderboardSource::Store);
        assert_eq!(ids(&read.entries), vec![2, 1]);
    }
    assert_eq!(store.user_calls(), 2);
}

#[tokio::test]
async fn failed_cache_write_still_returns_entries() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(7, 5)]),
        ..Default::default()
    });
    let cache = Arc::new(FlakyCache {
        fail_writes: true,
        ..Default::default()
    });
    let service = LeaderboardService::new(cache.clone(), store.clone(), &config(60));

    let entries = service.top_users().await.expect("leaderboard");

    assert_eq!(ids(&entries), vec![7]);
    assert_eq!(cache.writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn store_failure_is_reported_and_not_cached() {
    let store = Arc::new(FakeStore {
        users: Script::Fail,
        ..Default::default()
    });
    let config = config(60);
    let cache = Arc::new(MemoryCache::new(&config));
    let service = LeaderboardService::new(cache.clone(), store.clone(), &config);

    assert!(service.top_users().await.is_err());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn unrepresentable_ttl_still_serves_the_leaderboard() {
    let store = Arc::new(FakeStore {
        users: Script::Rows(vec![customer(1, 50)]),
        ..Default::default()
    });
    let config = CacheConfig {
        leaderboard_ttl: Duration::from_secs(10_000_000_000_000),
        ..Default::default()
    };
    let cache = Arc::new(MemoryCache::new(&config));
    let service = LeaderboardService::new(cache.clone(), store.clone(), &config);

    for _ in 0..2 {
        let entries = service.top_users().await.expect("leaderboard");
        assert_eq!(ids(&entries), vec![1]);
    }
    assert!(cache.is_empty());
    assert_eq!(store.user_calls(), 2);
}
