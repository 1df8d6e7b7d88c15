//! Discovery and decoding of `.semanticdb` files.
//!
//! Walks each input root depth-first and decodes every file whose name ends
//! in `.semanticdb`, with no assumptions about directory layout. All
//! failures are fatal and carry the offending path.

use crate::proto::TextDocuments;
use prost::Message;
use semlsif_core::{Result, SemlsifError};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

const SEMANTICDB_SUFFIX: &str = ".semanticdb";

/// Decode every `.semanticdb` file under `root`, in traversal order.
pub fn load_tree(root: &Path) -> Result<Vec<TextDocuments>> {
    info!("loading SemanticDB data from {}", root.display());

    let mut batches = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            SemlsifError::InputIo {
                path,
                source: e.into(),
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let is_semanticdb = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(SEMANTICDB_SUFFIX));
        if !is_semanticdb {
            continue;
        }

        batches.push(load_file(entry.path())?);
    }

    Ok(batches)
}

/// Read and decode a single `.semanticdb` file.
pub fn load_file(path: &Path) -> Result<TextDocuments> {
    let contents = std::fs::read(path).map_err(|e| SemlsifError::input_io(path, e))?;

    let batch =
        TextDocuments::decode(contents.as_slice()).map_err(|e| SemlsifError::InputDecode {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!("{}: {} document(s)", path.display(), batch.documents.len());
    Ok(batch)
}
