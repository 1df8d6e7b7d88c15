//! Per-document correlation state and the URI-keyed registry.

use indexmap::IndexMap;
use semlsif_core::{Result, SemlsifError};
use semlsif_semanticdb::{SymbolInformation, TextDocument, TextDocuments};
use std::collections::{BTreeMap, HashMap};

/// Vertex IDs recorded for one defining occurrence.
#[derive(Debug, Clone, Copy)]
pub struct DefInfo {
    pub doc_id: u64,
    pub range_id: u64,
    pub result_set_id: u64,
    pub def_result_id: u64,
}

/// Accumulated defining and referencing ranges for one symbol, partitioned
/// by the document that contains each range.
#[derive(Debug, Clone)]
pub struct RefResultInfo {
    pub result_set_id: u64,
    pub def_range_ids: BTreeMap<u64, Vec<u64>>,
    pub ref_range_ids: BTreeMap<u64, Vec<u64>>,
}

impl RefResultInfo {
    pub fn new(result_set_id: u64) -> Self {
        Self {
            result_set_id,
            def_range_ids: BTreeMap::new(),
            ref_range_ids: BTreeMap::new(),
        }
    }
}

/// One registered document: the parsed input, its symbol table, the IDs
/// allocated for it, and its document-local correlation tables.
#[derive(Debug)]
pub struct DocumentEntry {
    pub document: TextDocument,
    pub symbols: HashMap<String, SymbolInformation>,
    pub doc_id: u64,
    pub def_range_ids: Vec<u64>,
    pub use_range_ids: Vec<u64>,
    pub local_defs: HashMap<String, DefInfo>,
    pub local_refs: HashMap<String, RefResultInfo>,
}

impl DocumentEntry {
    fn new(document: TextDocument, symbols: HashMap<String, SymbolInformation>) -> Self {
        Self {
            document,
            symbols,
            doc_id: 0,
            def_range_ids: Vec::new(),
            use_range_ids: Vec::new(),
            local_defs: HashMap::new(),
            local_refs: HashMap::new(),
        }
    }
}

/// Registry of documents keyed by URI, iterated in registration order.
///
/// Re-registering a URI silently replaces the earlier document: the last
/// one loaded wins.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    entries: IndexMap<String, DocumentEntry>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every document of a decoded batch.
    ///
    /// Fails when a document declares two symbols with the same key.
    pub fn register_batch(&mut self, batch: TextDocuments) -> Result<()> {
        for document in batch.documents {
            self.register(document)?;
        }
        Ok(())
    }

    fn register(&mut self, document: TextDocument) -> Result<()> {
        let mut symbols = HashMap::with_capacity(document.symbols.len());
        for info in &document.symbols {
            if symbols
                .insert(info.symbol.clone(), info.clone())
                .is_some()
            {
                return Err(SemlsifError::DuplicateSymbol {
                    uri: document.uri.clone(),
                    symbol: info.symbol.clone(),
                });
            }
        }

        self.entries
            .insert(document.uri.clone(), DocumentEntry::new(document, symbols));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, uri: &str) -> Option<&DocumentEntry> {
        self.entries.get(uri)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentEntry> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DocumentEntry> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semlsif_semanticdb::Language;

    fn document(uri: &str, symbols: &[(&str, &str)]) -> TextDocument {
        TextDocument {
            uri: uri.to_string(),
            language: Language::Scala as i32,
            symbols: symbols
                .iter()
                .map(|(symbol, display_name)| SymbolInformation {
                    symbol: symbol.to_string(),
                    display_name: display_name.to_string(),
                })
                .collect(),
            occurrences: Vec::new(),
        }
    }

    #[test]
    fn register_builds_symbol_table() {
        let mut registry = DocumentRegistry::new();
        registry
            .register_batch(TextDocuments {
                documents: vec![document("a.scala", &[("a/A#", "A"), ("local0", "x")])],
            })
            .unwrap();

        let entry = registry.get("a.scala").unwrap();
        assert_eq!(entry.symbols.len(), 2);
        assert_eq!(entry.symbols["a/A#"].display_name, "A");
    }

    #[test]
    fn duplicate_symbol_key_is_fatal_and_names_the_key() {
        let mut registry = DocumentRegistry::new();
        let err = registry
            .register_batch(TextDocuments {
                documents: vec![document("a.scala", &[("a/A#", "A"), ("a/A#", "A")])],
            })
            .expect_err("duplicate key must fail registration");

        match err {
            SemlsifError::DuplicateSymbol { uri, symbol } => {
                assert_eq!(uri, "a.scala");
                assert_eq!(symbol, "a/A#");
            }
            other => panic!("expected DuplicateSymbol, got {other}"),
        }
    }

    #[test]
    fn re_registered_uri_replaces_the_earlier_document() {
        let mut registry = DocumentRegistry::new();
        registry
            .register_batch(TextDocuments {
                documents: vec![
                    document("a.scala", &[("a/Old#", "Old")]),
                    document("a.scala", &[("a/New#", "New")]),
                ],
            })
            .unwrap();

        assert_eq!(registry.len(), 1);
        let entry = registry.get("a.scala").unwrap();
        assert!(entry.symbols.contains_key("a/New#"));
        assert!(!entry.symbols.contains_key("a/Old#"));
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = DocumentRegistry::new();
        for uri in ["c.scala", "a.scala", "b.scala"] {
            registry
                .register_batch(TextDocuments {
                    documents: vec![document(uri, &[])],
                })
                .unwrap();
        }

        let uris: Vec<&str> = registry.iter().map(|e| e.document.uri.as_str()).collect();
        assert_eq!(uris, vec!["c.scala", "a.scala", "b.scala"]);
    }
}
