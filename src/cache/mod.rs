//! Process-wide key/value cache.
//!
//! The homepage leaderboard is the only consumer today. Values are stored as
//! serialized strings with a relative time-to-live; there is no invalidation
//! on writes, so readers may observe data up to one TTL old.
//!
//! ```toml
//! [cache]
//! capacity = 64
//! leaderboard_ttl_seconds = 60
//! ```

mod backend;
mod clock;
mod config;
mod lock;
mod memory;

pub use backend::{CacheBackend, CacheError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use memory::MemoryCache;
