//! The correlation engine and driver.
//!
//! After loading, [`Indexer::index`] emits the metadata/project/document
//! frames and then runs three passes over every document's occurrences:
//!
//! 1. definitions: ranges, result sets, definition results, hovers;
//! 2. uses: ranges linked to the result sets created by pass 1, with
//!    unresolvable references routed to their own reference result;
//! 3. link-up: one reference result per defining occurrence, enumerating
//!    the full closure of defining and referencing ranges, followed by the
//!    per-document `contains` edges.
//!
//! Definitions must complete over *all* documents before any use is
//! processed, so a reference in one document can land on a result set
//! created for another.

use crate::document::{DefInfo, DocumentEntry, DocumentRegistry, RefResultInfo};
use semlsif_core::{IndexStats, Result, SemlsifError};
use semlsif_protocol::{Emitter, MarkedString, Pos, RecordSink, ToolInfo};
use semlsif_semanticdb::{Range, Role, TextDocuments};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const LANGUAGE_SCALA: &str = "scala";

/// Prefix marking a symbol key as document-scoped.
const LOCAL_PREFIX: &str = "local";

pub struct Indexer<S> {
    emitter: Emitter<S>,
    registry: DocumentRegistry,
    /// Index-scoped correlation tables, keyed by symbol.
    defs: HashMap<String, DefInfo>,
    refs: HashMap<String, RefResultInfo>,
    project_root: PathBuf,
    tool_info: ToolInfo,
    print_progress: bool,
}

impl<S: RecordSink> Indexer<S> {
    pub fn new(
        project_root: impl Into<PathBuf>,
        print_progress: bool,
        tool_info: ToolInfo,
        sink: S,
    ) -> Self {
        Self {
            emitter: Emitter::new(sink),
            registry: DocumentRegistry::new(),
            defs: HashMap::new(),
            refs: HashMap::new(),
            project_root: project_root.into(),
            tool_info,
            print_progress,
        }
    }

    /// Load and register every `.semanticdb` file under `root`.
    pub fn load_root(&mut self, root: &Path) -> Result<()> {
        for batch in semlsif_semanticdb::load_tree(root)? {
            self.registry.register_batch(batch)?;
        }
        Ok(())
    }

    /// Register already-decoded batches, bypassing the filesystem.
    pub fn register_batch(&mut self, batch: TextDocuments) -> Result<()> {
        self.registry.register_batch(batch)
    }

    /// Emit the full LSIF graph for everything registered so far.
    pub fn index(&mut self) -> Result<IndexStats> {
        let root_uri = format!("file://{}", self.project_root.display());
        self.emitter.emit_metadata(&root_uri, self.tool_info.clone());
        let project_id = self.emitter.emit_project(LANGUAGE_SCALA);

        self.emit_documents(project_id)?;

        info!("emitting definitions...");
        for entry in self.registry.iter_mut() {
            progress_dot(self.print_progress);
            debug!("emitting definitions for {}", entry.document.uri);
            correlate_definitions(&mut self.emitter, &mut self.defs, &mut self.refs, entry);
        }

        info!("emitting uses...");
        for entry in self.registry.iter_mut() {
            progress_dot(self.print_progress);
            debug!("emitting uses for {}", entry.document.uri);
            correlate_uses(&mut self.emitter, &self.defs, &mut self.refs, entry);
        }

        info!("linking references...");
        for entry in self.registry.iter() {
            progress_dot(self.print_progress);
            link_references(&mut self.emitter, &self.refs, entry);

            let ranges: BTreeSet<u64> = entry
                .def_range_ids
                .iter()
                .chain(&entry.use_range_ids)
                .copied()
                .collect();
            if !ranges.is_empty() {
                self.emitter
                    .emit_contains(entry.doc_id, ranges.into_iter().collect());
            }
        }

        let num_defs = self.defs.len()
            + self
                .registry
                .iter()
                .map(|entry| entry.local_defs.len())
                .sum::<usize>();

        self.emitter.flush()?;

        Ok(IndexStats {
            num_files: self.registry.len(),
            num_defs,
            num_elements: self.emitter.num_elements(),
        })
    }

    fn emit_documents(&mut self, project_id: u64) -> Result<()> {
        info!("emitting documents...");
        for entry in self.registry.iter_mut() {
            progress_dot(self.print_progress);

            let absolute = std::path::absolute(Path::new(&entry.document.uri))
                .map_err(|e| SemlsifError::input_io(entry.document.uri.as_str(), e))?;
            let uri = format!("file://{}", absolute.display());

            let doc_id = self.emitter.emit_document(LANGUAGE_SCALA, &uri);
            self.emitter.emit_contains(project_id, vec![doc_id]);
            entry.doc_id = doc_id;
        }
        Ok(())
    }

    /// Access the sink, e.g. to inspect a recording sink after a run.
    pub fn sink(&self) -> &S {
        self.emitter.sink()
    }
}

fn is_local(symbol: &str) -> bool {
    symbol.starts_with(LOCAL_PREFIX)
}

fn progress_dot(enabled: bool) {
    if enabled {
        print!(".");
        let _ = std::io::stdout().flush();
    }
}

fn start_pos(range: &Range) -> Pos {
    Pos {
        line: range.start_line,
        character: range.start_character,
    }
}

fn end_pos(range: &Range) -> Pos {
    Pos {
        line: range.end_line,
        character: range.end_character,
    }
}

/// Pass 1: every defining occurrence gets a range, a (possibly shared)
/// result set, a definition result, and a hover result.
fn correlate_definitions<S: RecordSink>(
    emitter: &mut Emitter<S>,
    defs: &mut HashMap<String, DefInfo>,
    refs: &mut HashMap<String, RefResultInfo>,
    entry: &mut DocumentEntry,
) {
    for occurrence in &entry.document.occurrences {
        if occurrence.role() != Role::Definition {
            continue;
        }

        let key = occurrence.symbol.as_str();
        let local = is_local(key);
        let range = occurrence.range();

        let range_id = emitter.emit_range(start_pos(&range), end_pos(&range));
        entry.def_range_ids.push(range_id);

        // One result set per (scope, symbol), created on first definition.
        let table = if local { &mut entry.local_refs } else { &mut *refs };
        let ref_result = table
            .entry(key.to_string())
            .or_insert_with(|| RefResultInfo::new(emitter.emit_result_set()));
        let result_set_id = ref_result.result_set_id;
        ref_result
            .def_range_ids
            .entry(entry.doc_id)
            .or_default()
            .push(range_id);

        emitter.emit_next(range_id, result_set_id);
        let def_result_id = emitter.emit_definition_result();
        emitter.emit_text_document_definition(result_set_id, def_result_id);
        emitter.emit_item(def_result_id, vec![range_id], entry.doc_id);

        let def = DefInfo {
            doc_id: entry.doc_id,
            range_id,
            result_set_id,
            def_result_id,
        };
        if local {
            entry.local_defs.insert(key.to_string(), def);
        } else {
            defs.insert(key.to_string(), def);
        }

        // A defining occurrence may lack a symbol-table entry; hover is then
        // an empty value rather than a failure.
        let display_name = entry
            .symbols
            .get(key)
            .map(|info| info.display_name.clone())
            .unwrap_or_default();
        let hover_id = emitter.emit_hover_result(vec![MarkedString {
            language: LANGUAGE_SCALA.to_string(),
            value: display_name,
        }]);
        emitter.emit_text_document_hover(result_set_id, hover_id);
    }
}

/// Where a resolved symbol's correlation state lives.
enum SymbolScope {
    Local(String),
    Global(String),
}

/// The symbol-resolution cascade for references.
///
/// Local definitions win outright. Global lookups then try the key as-is,
/// the pattern-matching case-class spelling (`.` → `#`), and the
/// setter/back-tick spelling (`_=` and `` ` `` stripped), in that order,
/// stopping at the first hit. The rewrites are never combined or applied
/// recursively.
fn resolve_symbol(
    local_defs: &HashMap<String, DefInfo>,
    defs: &HashMap<String, DefInfo>,
    symbol: &str,
) -> Option<(DefInfo, SymbolScope)> {
    if let Some(def) = local_defs.get(symbol) {
        return Some((*def, SymbolScope::Local(symbol.to_string())));
    }

    let candidates = [
        symbol.to_string(),
        symbol.replace('.', "#"),
        symbol.replace("_=", "").replace('`', ""),
    ];
    for key in candidates {
        if let Some(def) = defs.get(&key) {
            return Some((*def, SymbolScope::Global(key)));
        }
    }

    None
}

/// Pass 2: referencing occurrences get a range and a `next` edge into the
/// definition's result set. References with no visible definition get their
/// own reference result, routed from the range itself.
fn correlate_uses<S: RecordSink>(
    emitter: &mut Emitter<S>,
    defs: &HashMap<String, DefInfo>,
    refs: &mut HashMap<String, RefResultInfo>,
    entry: &mut DocumentEntry,
) {
    for occurrence in &entry.document.occurrences {
        if occurrence.role() != Role::Reference {
            continue;
        }

        let resolved = resolve_symbol(&entry.local_defs, defs, &occurrence.symbol);

        let range = occurrence.range();
        let range_id = emitter.emit_range(start_pos(&range), end_pos(&range));
        entry.use_range_ids.push(range_id);

        let Some((def, scope)) = resolved else {
            let ref_result_id = emitter.emit_reference_result();
            emitter.emit_text_document_references(range_id, ref_result_id);
            emitter.emit_item_of_references(ref_result_id, vec![range_id], entry.doc_id);
            continue;
        };

        emitter.emit_next(range_id, def.result_set_id);

        let ref_result = match scope {
            SymbolScope::Local(key) => entry.local_refs.get_mut(&key),
            SymbolScope::Global(key) => refs.get_mut(&key),
        };
        if let Some(ref_result) = ref_result {
            ref_result
                .ref_range_ids
                .entry(entry.doc_id)
                .or_default()
                .push(range_id);
        }
    }
}

/// Pass 3: each defining occurrence gets a reference result enumerating
/// every defining and referencing range accumulated for its symbol.
fn link_references<S: RecordSink>(
    emitter: &mut Emitter<S>,
    refs: &HashMap<String, RefResultInfo>,
    entry: &DocumentEntry,
) {
    for occurrence in &entry.document.occurrences {
        if occurrence.role() != Role::Definition {
            continue;
        }

        let key = occurrence.symbol.as_str();
        let ref_result = if is_local(key) {
            entry.local_refs.get(key)
        } else {
            refs.get(key)
        };
        let Some(ref_result) = ref_result else {
            continue;
        };

        let ref_result_id = emitter.emit_reference_result();
        emitter.emit_text_document_references(ref_result.result_set_id, ref_result_id);

        for (doc_id, range_ids) in &ref_result.def_range_ids {
            emitter.emit_item_of_definitions(ref_result_id, range_ids.clone(), *doc_id);
        }
        for (doc_id, range_ids) in &ref_result.ref_range_ids {
            emitter.emit_item_of_references(ref_result_id, range_ids.clone(), *doc_id);
        }
    }
}
