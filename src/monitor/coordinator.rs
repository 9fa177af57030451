use std::{collections::HashSet, future::Future, io::Write, time::Duration};

use futures::future::join_all;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use super::{Emitter, StateCache};
use crate::{
    config::PollerConfig,
    core::Result,
    services::player::{
        FetchError, MetadataFetcher, PlayerDiscovery, PlayerId, PlayerState, Target, resolve,
    },
};

/// What a finished fetch task asks the emitter to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Print this freshly fetched state
    Show(PlayerState),
    /// Reprint the last known state after a transient failure
    Fallback(PlayerState),
    /// Print a blank line, the player is gone
    Clear,
    /// Nothing fresh and nothing cached, print nothing
    Silent,
}

/// Concrete player for an output slot, or why none was found
type Resolved = std::result::Result<PlayerId, FetchError>;

/// Result of one fetch task
#[derive(Debug)]
struct Settled {
    slot: PlayerId,
    resolution: Resolution,
}

/// Drives the timed poll loop.
///
/// Each tick discovers players, fetches every target concurrently, waits for
/// all of them, and only then writes output in discovery order.
pub struct PollCoordinator<W: Write> {
    target: Target,
    interval: Duration,
    evict_after: u32,
    discovery: PlayerDiscovery,
    fetcher: MetadataFetcher,
    cache: StateCache,
    emitter: Emitter<W>,
}

impl<W: Write> PollCoordinator<W> {
    /// Create a coordinator with an empty cache
    pub fn new(
        config: &PollerConfig,
        discovery: PlayerDiscovery,
        fetcher: MetadataFetcher,
        emitter: Emitter<W>,
    ) -> Self {
        Self {
            target: config.target.clone(),
            interval: config.interval,
            evict_after: config.evict_after,
            discovery,
            fetcher,
            cache: StateCache::new(),
            emitter,
        }
    }

    /// Shared state cache
    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    /// Output side, mainly for inspecting a test writer
    pub fn emitter(&self) -> &Emitter<W> {
        &self.emitter
    }

    /// Poll on every tick until `shutdown` resolves.
    ///
    /// A cycle in progress when `shutdown` fires is finished first. A cycle
    /// that overruns the interval delays the next one instead of queueing
    /// extra ticks.
    ///
    /// # Errors
    /// Returns error if output can no longer be written
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(players = ?self.target, interval = ?self.interval, "starting poll loop");

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("shutdown requested, leaving poll loop");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let started = Instant::now();
                    self.run_cycle().await?;

                    let elapsed = started.elapsed();
                    if elapsed > self.interval {
                        warn!(
                            ?elapsed,
                            interval = ?self.interval,
                            "poll cycle overran its interval"
                        );
                    }
                }
            }
        }
    }

    /// Run a single poll cycle.
    ///
    /// # Errors
    /// Returns error if output can no longer be written
    #[instrument(skip(self))]
    pub async fn run_cycle(&mut self) -> Result<()> {
        let active = self.discovery.list_active().await;
        let targets = self.targets(&active);

        let seen: HashSet<PlayerId> = targets
            .iter()
            .filter_map(|(_, resolved)| resolved.as_ref().ok().cloned())
            .collect();

        let tasks = targets.into_iter().map(|(slot, resolved)| {
            let fetcher = self.fetcher.clone();
            let cache = self.cache.clone();
            tokio::spawn(settle(fetcher, cache, slot, resolved))
        });

        for joined in join_all(tasks).await {
            let settled = match joined {
                Ok(settled) => settled,
                Err(e) => {
                    error!(error = %e, "fetch task failed");
                    continue;
                }
            };

            match settled.resolution {
                Resolution::Show(state) => {
                    self.emitter.emit(&settled.slot, &state)?;
                }
                Resolution::Fallback(state) => {
                    self.emitter.repeat(&settled.slot, &state)?;
                }
                Resolution::Clear => self.emitter.clear(&settled.slot)?,
                Resolution::Silent => {}
            }
        }

        let evicted = self.cache.sweep(&seen, self.evict_after).await;
        self.emitter.forget(&evicted);

        Ok(())
    }

    /// Pair each output slot with the concrete player to fetch for it.
    ///
    /// A named target keeps its logical name as the slot so that output
    /// tracking survives the concrete instance changing between ticks.
    fn targets(&self, active: &[PlayerId]) -> Vec<(PlayerId, Resolved)> {
        match &self.target {
            Target::Named(name) => vec![(PlayerId::new(name.as_str()), resolve(active, name))],
            Target::All => active
                .iter()
                .map(|player| (player.clone(), Ok(player.clone())))
                .collect(),
        }
    }
}

/// Fetch one player, fold the outcome into the cache, and decide what to show.
async fn settle(
    fetcher: MetadataFetcher,
    cache: StateCache,
    slot: PlayerId,
    resolved: Resolved,
) -> Settled {
    let player = match resolved {
        Ok(player) => player,
        Err(e) => {
            debug!(error = %e, "target not resolved");
            return Settled {
                slot,
                resolution: Resolution::Clear,
            };
        }
    };

    let outcome = fetcher.fetch(&player).await;
    cache.merge(&player, &outcome).await;

    let resolution = match outcome {
        Err(e) if e.is_authoritative() => {
            debug!(%player, error = %e, "clearing display");
            Resolution::Clear
        }
        Err(e) => {
            debug!(%player, error = %e, "transient fetch failure, using cached state");
            cache
                .read(&player)
                .await
                .map_or(Resolution::Silent, Resolution::Fallback)
        }
        Ok(_) => cache
            .read(&player)
            .await
            .map_or(Resolution::Silent, Resolution::Show),
    };

    Settled { slot, resolution }
}
