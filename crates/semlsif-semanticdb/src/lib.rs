//! semlsif-semanticdb: the slice of the SemanticDB protobuf schema the
//! indexer consumes, plus the loader that finds and decodes `.semanticdb`
//! files under one or more roots.

pub mod loader;
pub mod proto;

pub use loader::{load_file, load_tree};
pub use proto::{
    Language, Range, Role, SymbolInformation, SymbolOccurrence, TextDocument, TextDocuments,
};
