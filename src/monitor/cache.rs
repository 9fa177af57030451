use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::services::player::{FetchError, PlayerId, PlayerState};

#[derive(Debug, Clone)]
struct CacheEntry {
    state: PlayerState,
    missed_cycles: u32,
}

/// Last known good state per player, shared by the fetch tasks of a cycle.
///
/// Writes take the lock exclusively for a single read-modify-write; reads
/// take it shared. Cloning yields another handle to the same cache.
#[derive(Debug, Clone, Default)]
pub struct StateCache {
    entries: Arc<RwLock<HashMap<PlayerId, CacheEntry>>>,
}

impl StateCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetch outcome for `player`.
    ///
    /// Only a successful fetch with some content overwrites the entry. Failures
    /// of any kind, and fully empty states, leave the previous value in place.
    /// Returns whether the entry was written.
    pub async fn merge(&self, player: &PlayerId, outcome: &Result<PlayerState, FetchError>) -> bool {
        let Ok(state) = outcome else {
            return false;
        };
        if !state.has_content() {
            return false;
        }

        let mut entries = self.entries.write().await;
        entries.insert(
            player.clone(),
            CacheEntry {
                state: state.clone(),
                missed_cycles: 0,
            },
        );
        true
    }

    /// Current entry for `player`, if any
    pub async fn read(&self, player: &PlayerId) -> Option<PlayerState> {
        let entries = self.entries.read().await;
        entries.get(player).map(|entry| entry.state.clone())
    }

    /// Number of cached players
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Age out players that discovery no longer reports.
    ///
    /// Entries present in `seen` have their miss counter reset; all others are
    /// bumped and dropped once they have been missing for `evict_after`
    /// consecutive cycles. `evict_after == 0` disables eviction. Returns the
    /// evicted identifiers.
    #[instrument(skip(self, seen))]
    pub async fn sweep(&self, seen: &HashSet<PlayerId>, evict_after: u32) -> Vec<PlayerId> {
        if evict_after == 0 {
            return Vec::new();
        }

        let mut entries = self.entries.write().await;
        let mut evicted = Vec::new();

        entries.retain(|player, entry| {
            if seen.contains(player) {
                entry.missed_cycles = 0;
                return true;
            }

            entry.missed_cycles += 1;
            if entry.missed_cycles >= evict_after {
                evicted.push(player.clone());
                false
            } else {
                true
            }
        });

        if !evicted.is_empty() {
            debug!(?evicted, "evicted stale players");
        }
        evicted
    }
}
