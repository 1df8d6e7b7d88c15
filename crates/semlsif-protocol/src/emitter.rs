//! Typed façade over the record sink.
//!
//! One method per LSIF record kind. Every call allocates the next dense id,
//! performs exactly one sink write, and returns the id so callers can wire
//! later edges to it.

use crate::records::{
    Edge, ElementType, Entry, HoverContents, ItemProperty, MarkedString, Payload, Pos, ToolInfo,
    Vertex, POSITION_ENCODING, PROTOCOL_VERSION,
};
use crate::sink::RecordSink;
use semlsif_core::Result;

pub struct Emitter<S> {
    sink: S,
    count: u64,
}

impl<S: RecordSink> Emitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, count: 0 }
    }

    fn emit(&mut self, element: ElementType, payload: Payload) -> u64 {
        let id = self.count + 1;
        self.count = id;
        self.sink.write(&Entry {
            id,
            element,
            payload,
        });
        id
    }

    fn vertex(&mut self, vertex: Vertex) -> u64 {
        self.emit(ElementType::Vertex, Payload::Vertex(vertex))
    }

    fn edge(&mut self, edge: Edge) -> u64 {
        self.emit(ElementType::Edge, Payload::Edge(edge))
    }

    pub fn emit_metadata(&mut self, project_root: &str, tool_info: ToolInfo) -> u64 {
        self.vertex(Vertex::MetaData {
            version: PROTOCOL_VERSION.to_string(),
            project_root: project_root.to_string(),
            position_encoding: POSITION_ENCODING.to_string(),
            tool_info,
        })
    }

    pub fn emit_project(&mut self, language: &str) -> u64 {
        self.vertex(Vertex::Project {
            kind: language.to_string(),
        })
    }

    pub fn emit_document(&mut self, language: &str, uri: &str) -> u64 {
        self.vertex(Vertex::Document {
            uri: uri.to_string(),
            language_id: language.to_string(),
        })
    }

    pub fn emit_range(&mut self, start: Pos, end: Pos) -> u64 {
        self.vertex(Vertex::Range { start, end })
    }

    pub fn emit_result_set(&mut self) -> u64 {
        self.vertex(Vertex::ResultSet)
    }

    pub fn emit_definition_result(&mut self) -> u64 {
        self.vertex(Vertex::DefinitionResult)
    }

    pub fn emit_reference_result(&mut self) -> u64 {
        self.vertex(Vertex::ReferenceResult)
    }

    pub fn emit_hover_result(&mut self, contents: Vec<MarkedString>) -> u64 {
        self.vertex(Vertex::HoverResult {
            result: HoverContents { contents },
        })
    }

    pub fn emit_next(&mut self, out_v: u64, in_v: u64) -> u64 {
        self.edge(Edge::Next { out_v, in_v })
    }

    pub fn emit_text_document_definition(&mut self, out_v: u64, in_v: u64) -> u64 {
        self.edge(Edge::Definition { out_v, in_v })
    }

    pub fn emit_text_document_references(&mut self, out_v: u64, in_v: u64) -> u64 {
        self.edge(Edge::References { out_v, in_v })
    }

    pub fn emit_text_document_hover(&mut self, out_v: u64, in_v: u64) -> u64 {
        self.edge(Edge::Hover { out_v, in_v })
    }

    pub fn emit_item(&mut self, out_v: u64, in_vs: Vec<u64>, document: u64) -> u64 {
        self.edge(Edge::Item {
            out_v,
            in_vs,
            document,
            property: None,
        })
    }

    pub fn emit_item_of_definitions(&mut self, out_v: u64, in_vs: Vec<u64>, document: u64) -> u64 {
        self.edge(Edge::Item {
            out_v,
            in_vs,
            document,
            property: Some(ItemProperty::Definitions),
        })
    }

    pub fn emit_item_of_references(&mut self, out_v: u64, in_vs: Vec<u64>, document: u64) -> u64 {
        self.edge(Edge::Item {
            out_v,
            in_vs,
            document,
            property: Some(ItemProperty::References),
        })
    }

    pub fn emit_contains(&mut self, out_v: u64, in_vs: Vec<u64>) -> u64 {
        self.edge(Edge::Contains { out_v, in_vs })
    }

    /// Number of records emitted so far.
    pub fn num_elements(&self) -> u64 {
        self.count
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Access the sink, e.g. to inspect a [`crate::MemorySink`] in tests.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
