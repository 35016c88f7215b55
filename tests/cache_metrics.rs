use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use time::macros::datetime;
use zorpido::cache::{CacheBackend, CacheConfig, Clock, ManualClock, MemoryCache};

#[tokio::test]
async fn cache_paths_emit_expected_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let config = CacheConfig {
        capacity: 1,
        ..Default::default()
    };
    let manual = Arc::new(ManualClock::new(datetime!(2025-03-01 08:00 UTC)));
    let clock: Arc<dyn Clock> = manual.clone();
    let cache = MemoryCache::with_clock(&config, clock);
    let ttl = Duration::from_secs(30);

    // miss, then hit
    assert!(cache.get("a").await.expect("get").is_none());
    cache.set("a", "1".to_string(), ttl).await.expect("set");
    assert_eq!(cache.get("a").await.expect("get").as_deref(), Some("1"));

    // rewriting a key is not an eviction; a new key over capacity is
    cache.set("a", "2".to_string(), ttl).await.expect("set");
    cache.set("b", "3".to_string(), ttl).await.expect("set");

    // expiry
    manual.advance(ttl);
    assert!(cache.get("b").await.expect("get").is_none());

    let counters: HashMap<String, u64> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite_key, _, _, value)| match value {
            DebugValue::Counter(count) => Some((composite_key.key().name().to_string(), count)),
            _ => None,
        })
        .collect();

    let expected = [
        ("zorpido_cache_hit_total", 1),
        ("zorpido_cache_miss_total", 2),
        ("zorpido_cache_expired_total", 1),
        ("zorpido_cache_evict_total", 1),
    ];

    for (metric, count) in expected {
        assert_eq!(counters.get(metric), Some(&count), "metric: {metric}");
    }
}
