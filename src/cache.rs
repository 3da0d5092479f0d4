//! Time-bounded cache for loaded sheet sets.
//!
//! A single global cache keyed by nothing but time: the whole [`SheetSet`]
//! is kept for [`CACHE_TTL`] and refetched afterwards. There is no
//! concurrent in-process writer in the hosting model, so a plain mutex
//! around the slot is enough.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::sheets::SheetSet;
use crate::source::{SheetSource, load_all};

/// How long a fetched sheet set stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// A sheet set plus the moment it was fetched.
#[derive(Debug, Clone)]
pub struct SheetCache {
    pub set: SheetSet,
    pub fetched_at: Instant,
}

impl SheetCache {
    pub fn new(set: SheetSet, fetched_at: Instant) -> Self {
        Self { set, fetched_at }
    }

    pub fn is_stale(&self, now: Instant) -> bool {
        now.duration_since(self.fetched_at) >= CACHE_TTL
    }
}

/// Wraps a [`SheetSource`], serving cached sheet sets within the TTL.
pub struct CachedLoader<S> {
    source: S,
    slot: Mutex<Option<SheetCache>>,
}

impl<S: SheetSource> CachedLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached set when fresh, otherwise refetches everything.
    pub async fn load(&self) -> SheetSet {
        let now = Instant::now();

        {
            let slot = self.slot.lock().expect("sheet cache poisoned");
            if let Some(cached) = slot.as_ref() {
                if !cached.is_stale(now) {
                    debug!("Serving sheets from cache");
                    return cached.set.clone();
                }
            }
        }

        info!("Cache empty or stale, fetching sheets");
        let set = load_all(&self.source).await;

        let mut slot = self.slot.lock().expect("sheet cache poisoned");
        *slot = Some(SheetCache::new(set.clone(), now));
        set
    }
}
