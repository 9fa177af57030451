//! State-monitoring loop: the shared cache, change detection and the
//! timed coordinator that ties discovery, fetching and output together.

mod cache;
mod coordinator;
mod emitter;

#[cfg(test)]
mod tests;

pub use cache::StateCache;
pub use coordinator::{PollCoordinator, Resolution};
pub use emitter::Emitter;
