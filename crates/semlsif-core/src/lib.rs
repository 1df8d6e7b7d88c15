//! semlsif-core: Shared error and statistics types for the semlsif indexer.

pub mod error;
pub mod stats;

pub use error::*;
pub use stats::*;
