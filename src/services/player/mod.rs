/// Active player listing and logical name resolution
pub mod discovery;
/// Fetch error taxonomy
pub mod error;
/// Status and player glyph lookup
pub mod icons;
/// OS process liveness check
pub mod liveness;
/// Metadata normalization and per-player fetch
pub mod metadata;
/// `playerctl` command client
pub mod playerctl;
/// Player identity and state types
pub mod types;


pub use discovery::*;
pub use error::*;
pub use metadata::*;
pub use playerctl::Playerctl;
pub use types::*;
