//! 生成済みページのメモリキャッシュ
//!
//! - 生成から `ttl` 未満のエントリはそのまま返す
//! - 期限切れなら再生成する。同じキーの再生成は同時に 1 つだけ走り、待っていた
//!   リクエストはその結果（失敗した場合は古いエントリ）を使う
//! - 再生成に失敗したら古いエントリを返す（`UnknownPost` の場合は削除して伝播）
//! - キーごとのロックは待っているリクエストがいなくなったら捨てる

use blog_core::BlogError;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, RwLock};

#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    generated_at: DateTime<Utc>,
}

type KeyLocks = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

/// A claim on one key's regeneration lock. Dropping the last claim removes
/// the lock from the map.
struct KeyLock<'a> {
    locks: &'a KeyLocks,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> KeyLock<'a> {
    fn acquire(locks: &'a KeyLocks, key: &'a str) -> Self {
        let lock = locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone();
        Self { locks, key, lock }
    }
}

impl Drop for KeyLock<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // map + self
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(self.key);
        }
    }
}

pub struct RegenerationCache<V> {
    name: &'static str,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    regenerating: KeyLocks,
}

impl<V: Clone> RegenerationCache<V> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            entries: RwLock::new(HashMap::new()),
            regenerating: StdMutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn prime(&self, key: &str, value: V) {
        self.prime_at(key, value, Utc::now()).await
    }

    pub async fn prime_at(&self, key: &str, value: V, now: DateTime<Utc>) {
        self.entries.write().await.insert(
            key.to_string(),
            CacheEntry {
                value,
                generated_at: now,
            },
        );
    }

    async fn fresh(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        (now - entry.generated_at < self.ttl).then(|| entry.value.clone())
    }

    async fn any(&self, key: &str) -> Option<V> {
        self.entries.read().await.get(key).map(|e| e.value.clone())
    }

    pub async fn get_or_regenerate<F, Fut>(&self, key: &str, regenerate: F) -> Result<V, BlogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, BlogError>>,
    {
        self.get_or_regenerate_at(key, Utc::now(), regenerate).await
    }

    pub async fn get_or_regenerate_at<F, Fut>(
        &self,
        key: &str,
        now: DateTime<Utc>,
        regenerate: F,
    ) -> Result<V, BlogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, BlogError>>,
    {
        if let Some(value) = self.fresh(key, now).await {
            tracing::debug!("[{}] hit {}", self.name, key);
            return Ok(value);
        }

        let key_lock = KeyLock::acquire(&self.regenerating, key);
        let (_regenerating, waited) = match key_lock.lock.try_lock() {
            Ok(guard) => (guard, false),
            Err(_) => (key_lock.lock.lock().await, true),
        };

        // 待っている間に別のリクエストが再生成を終えている。失敗していても
        // 古いエントリがあればそれを使い、上流を叩き直さない
        if waited {
            if let Some(value) = self.any(key).await {
                tracing::debug!("[{}] hit {} after waiting", self.name, key);
                return Ok(value);
            }
        } else if let Some(value) = self.fresh(key, now).await {
            tracing::debug!("[{}] hit {} after locking", self.name, key);
            return Ok(value);
        }

        tracing::debug!("[{}] regenerating {}", self.name, key);
        match regenerate().await {
            Ok(value) => {
                self.prime_at(key, value.clone(), now).await;
                Ok(value)
            }
            Err(BlogError::UnknownPost(uid)) => {
                self.entries.write().await.remove(key);
                Err(BlogError::UnknownPost(uid))
            }
            Err(e) => {
                if let Some(stale) = self.entries.read().await.get(key) {
                    tracing::warn!(
                        "[{}] regeneration of {} failed, serving page generated at {}: {}",
                        self.name,
                        key,
                        stale.generated_at,
                        e
                    );
                    return Ok(stale.value.clone());
                }
                Err(e)
            }
        }
    }

    #[cfg(test)]
    fn regenerating_len(&self) -> usize {
        self.regenerating
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
