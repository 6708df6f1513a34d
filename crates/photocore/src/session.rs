//! Per-user pending photo store
//!
//! Holds at most one photo per user between the upload and the copy count.
//! Entries own their temporary file, so overwriting, clearing or evicting an
//! entry also deletes the photo from disk.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tempfile::TempPath;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Telegram user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserKey(pub u64);

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Photo waiting for a copy count
#[derive(Debug)]
pub struct PendingPhoto {
    path: TempPath,
    received_at: Instant,
}

impl PendingPhoto {
    pub fn new(path: TempPath) -> Self {
        Self {
            path,
            received_at: Instant::now(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn age(&self) -> Duration {
        self.received_at.elapsed()
    }
}

/// In-memory session store, shared between handlers through `Arc`
///
/// Readers get an `Arc<PendingPhoto>`, which keeps the file alive while a
/// collage is being composed even if the entry is replaced meanwhile.
pub struct SessionStore {
    pending: DashMap<UserKey, Arc<PendingPhoto>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: DashMap::new(),
            ttl,
        }
    }

    /// Store with TTL from `SESSION_TTL_SECS`
    pub fn from_config() -> Self {
        Self::new(crate::config::session::ttl())
    }

    /// Replaces whatever the user had pending (last write wins)
    pub fn put(&self, user: UserKey, photo: PendingPhoto) {
        if let Some(previous) = self.pending.insert(user, Arc::new(photo)) {
            log::debug!(
                "Replaced pending photo for user {} ({} -> new upload)",
                user,
                previous.path().display()
            );
        }
    }

    /// Current pending photo; expired entries are removed and reported as absent
    pub fn get(&self, user: UserKey) -> Option<Arc<PendingPhoto>> {
        let photo = self.pending.get(&user).map(|entry| Arc::clone(entry.value()))?;
        if photo.age() >= self.ttl {
            self.pending.remove_if(&user, |_, current| Arc::ptr_eq(current, &photo));
            log::info!("Pending photo for user {} expired after {:?}", user, photo.age());
            return None;
        }
        Some(photo)
    }

    pub fn clear(&self, user: UserKey) {
        self.pending.remove(&user);
    }

    /// Drops every entry older than the TTL, returns how many were removed
    pub fn evict_expired(&self) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, photo| photo.age() < self.ttl);
        before.saturating_sub(self.pending.len())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Periodically evicts expired entries until the returned handle is aborted
    pub fn spawn_cleanup_task(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = self.evict_expired();
                if evicted > 0 {
                    log::info!("Evicted {} abandoned pending photo(s), {} left", evicted, self.len());
                }
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::session::DEFAULT_TTL_SECS))
    }
}
