//! Farelight Query Cache
//! Copyright (c) 2026 Farelight Developers
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! farelight-internals/query-cache
//! A keyed TTL cache and an input debouncer for remote query adapters.
//!
//! `TtlCache` is the explicit replacement for a generic request-cache
//! library: a small map keyed by normalized query string with a fixed
//! time-to-live and manual invalidation. `Debouncer` implements the
//! cancellable-timer + generation-counter pattern: every new input bumps
//! a monotonic counter, and a pending result is applied only if its
//! captured counter still matches the current one at resolution time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time;

/// Normalize a raw query string into a cache key: trim, collapse
/// internal whitespace, lowercase.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// A keyed cache with a fixed time-to-live per entry.
///
/// Expired entries are evicted lazily on read. Cloning is cheap: clones
/// share the same underlying map.
#[derive(Clone)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, Entry<V>>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a key, evicting it first if its TTL has elapsed.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or refresh a key. The TTL clock restarts on every insert.
    pub async fn insert(&self, key: &str, value: V) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop a single key. Returns whether an entry was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        entries.remove(key).is_some()
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.clear();
    }

    /// Number of entries currently stored, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Debounces a stream of inputs with a quiet period and a monotonic
/// generation counter.
///
/// # Examples
///
/// ```ignore
/// let debouncer = Debouncer::new(Duration::from_millis(300));
/// let Some(ticket) = debouncer.acquire().await else {
///     return; // superseded during the quiet period
/// };
/// let result = fetch().await?;
/// if ticket.is_current() {
///     apply(result); // no newer input arrived while fetching
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Debouncer {
    quiet: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Current generation. Bumped by every `acquire`.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Bump the generation and wait out the quiet period.
    ///
    /// Returns `None` if a newer `acquire` happened while waiting, in
    /// which case the caller must discard its input. On `Some`, the
    /// returned ticket tells the caller whether its generation is still
    /// current once its (asynchronous) work has resolved.
    pub async fn acquire(&self) -> Option<DebounceTicket> {
        let claimed = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        time::sleep(self.quiet).await;
        if self.generation.load(Ordering::SeqCst) == claimed {
            Some(DebounceTicket {
                claimed,
                generation: Arc::clone(&self.generation),
            })
        } else {
            None
        }
    }
}

/// Proof that an input survived the quiet period, capturing the
/// generation it was issued under.
#[derive(Debug)]
pub struct DebounceTicket {
    claimed: u64,
    generation: Arc<AtomicU64>,
}

impl DebounceTicket {
    /// Whether no newer input has been submitted since this ticket was
    /// issued. Checked at result-application time.
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.claimed
    }
}
