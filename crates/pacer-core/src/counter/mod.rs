//! Per-key counter safe under concurrent access.
//!
//! Keys are spread across one or more independently locked shards. With a single shard every
//! operation is serialized on one lock; with more, operations on keys in different shards do not
//! contend. Either way, increments to one key are never lost and the backing maps are never
//! handed out.
use std::{
    collections::HashMap,
    fmt,
    hash::{BuildHasher, RandomState},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

type Shard = Mutex<HashMap<String, u64>>;

/// Synchronized string-keyed counter.
///
/// Cloning is cheap; every clone shares the same store.
#[derive(Clone)]
pub struct Counter {
    inner: Arc<CounterInner>,
}

struct CounterInner {
    hasher: RandomState,
    shards: Box<[Shard]>,
}

impl Counter {
    /// Counter with a single lock over the whole map.
    pub fn new() -> Self {
        Self::with_shards(1)
    }

    /// Counter striped over `shards` locks (at least one).
    pub fn with_shards(shards: usize) -> Self {
        let shards = (0..shards.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();

        Self {
            inner: Arc::new(CounterInner {
                hasher: RandomState::new(),
                shards,
            }),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.inner.shards.len()
    }

    /// Add one to `key`, creating it on first use.
    pub fn increment(&self, key: &str) {
        let mut map = self.lock(key);
        match map.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                map.insert(key.to_owned(), 1);
            }
        }
    }

    /// Current count for `key`; zero if it was never incremented.
    pub fn value(&self, key: &str) -> u64 {
        self.lock(key).get(key).copied().unwrap_or(0)
    }

    /// Owned copy of all counts.
    ///
    /// Each shard is copied under its own lock, so keys in different shards may be captured at
    /// slightly different moments.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        let mut out = HashMap::new();
        for shard in self.inner.shards.iter() {
            let map = shard.lock().unwrap_or_else(PoisonError::into_inner);
            out.extend(map.iter().map(|(k, v)| (k.clone(), *v)));
        }
        out
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner
            .shards
            .iter()
            .map(|s| s.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Critical sections are a single map lookup or insert and never panic midway, so a
    // poisoned shard is still consistent.
    fn lock(&self, key: &str) -> MutexGuard<'_, HashMap<String, u64>> {
        let shards = &self.inner.shards;
        let idx = if shards.len() == 1 {
            0
        } else {
            (self.inner.hasher.hash_one(key) % shards.len() as u64) as usize
        };
        shards[idx].lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("shards", &self.shard_count())
            .field("keys", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "somekey";

    #[test]
    fn untouched_key_is_zero() {
        let c = Counter::new();
        assert_eq!(c.value("never-touched"), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn increment_creates_then_adds() {
        let c = Counter::new();
        c.increment(KEY);
        assert_eq!(c.value(KEY), 1);
        c.increment(KEY);
        assert_eq!(c.value(KEY), 2);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn keys_are_isolated() {
        let c = Counter::with_shards(4);
        c.increment("a");
        c.increment("a");
        assert_eq!(c.value("a"), 2);
        assert_eq!(c.value("b"), 0);

        c.increment("b");
        assert_eq!(c.value("a"), 2);
        assert_eq!(c.value("b"), 1);
    }

    #[test]
    fn zero_shards_means_one() {
        assert_eq!(Counter::with_shards(0).shard_count(), 1);
    }

    #[test]
    fn clones_share_store() {
        let c = Counter::new();
        let other = c.clone();
        other.increment(KEY);
        assert_eq!(c.value(KEY), 1);
    }

    #[test]
    fn snapshot_is_detached_copy() {
        let c = Counter::with_shards(8);
        for key in ["x", "y", "y", "z", "z", "z"] {
            c.increment(key);
        }

        let snap = c.snapshot();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap["x"], 1);
        assert_eq!(snap["y"], 2);
        assert_eq!(snap["z"], 3);

        c.increment("x");
        assert_eq!(snap["x"], 1);
        assert_eq!(c.value("x"), 2);
    }

    #[test]
    fn threads_racing_one_key_lose_nothing() {
        for shards in [1, 16] {
            let c = Counter::with_shards(shards);
            std::thread::scope(|scope| {
                for _ in 0..8 {
                    let c = c.clone();
                    scope.spawn(move || {
                        for _ in 0..1_000 {
                            c.increment(KEY);
                        }
                    });
                }
            });
            assert_eq!(c.value(KEY), 8_000, "shards = {shards}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn thousand_concurrent_increments() {
        let c = Counter::new();

        let handles: Vec<_> = (0..1_000)
            .map(|_| {
                let c = c.clone();
                tokio::spawn(async move { c.increment(KEY) })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(c.value(KEY), 1_000);
    }

    #[test]
    fn reads_during_writes_are_monotonic() {
        let c = Counter::new();
        std::thread::scope(|scope| {
            let writer = c.clone();
            scope.spawn(move || {
                for _ in 0..5_000 {
                    writer.increment(KEY);
                }
            });

            let mut last = 0;
            for _ in 0..5_000 {
                let now = c.value(KEY);
                assert!(now >= last && now <= 5_000);
                last = now;
            }
        });
        assert_eq!(c.value(KEY), 5_000);
    }

    #[test]
    fn mixed_keys_under_contention() {
        let c = Counter::with_shards(4);
        let keys = ["alpha", "beta", "gamma", "delta"];
        std::thread::scope(|scope| {
            for (i, key) in keys.iter().enumerate() {
                let c = c.clone();
                scope.spawn(move || {
                    for _ in 0..(i + 1) * 250 {
                        c.increment(key);
                    }
                });
            }
        });
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(c.value(key), ((i + 1) * 250) as u64);
        }
    }
}
