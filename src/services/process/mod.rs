/// Process runner error types
pub mod error;
/// Command runner trait and subprocess implementation
pub mod runner;


pub use error::*;
pub use runner::*;
