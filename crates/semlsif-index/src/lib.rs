//! semlsif-index: the correlation core.
//!
//! Builds an in-memory model of every SemanticDB document keyed by symbol,
//! then emits an LSIF graph in three passes: definitions, uses, link-up.

pub mod document;
pub mod indexer;

pub use document::{DefInfo, DocumentEntry, DocumentRegistry, RefResultInfo};
pub use indexer::{Indexer, LANGUAGE_SCALA};
