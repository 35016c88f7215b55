use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("ttl of {0:?} puts the expiry out of range")]
    TtlOutOfRange(Duration),
}

impl CacheError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Key/value store holding serialized payloads with a relative expiry.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns `Ok(None)` for absent and expired keys alike.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` for `ttl`; a zero `ttl` drops the key instead.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
