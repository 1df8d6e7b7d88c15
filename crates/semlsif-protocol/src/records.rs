//! Serde models for the LSIF records semlsif emits.
//!
//! Every record serializes to one JSON object with `id`, `type`, `label`,
//! and a label-specific payload, matching LSIF 0.4.x line format.

use serde::Serialize;

/// LSIF protocol version reported in the metadata vertex.
pub const PROTOCOL_VERSION: &str = "0.4.3";

/// Position encoding reported in the metadata vertex.
pub const POSITION_ENCODING: &str = "utf-16";

/// Identity of the tool that produced the dump.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// A zero-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pos {
    pub line: i32,
    pub character: i32,
}

/// One entry of a hover result's contents array.
#[derive(Debug, Clone, Serialize)]
pub struct MarkedString {
    pub language: String,
    pub value: String,
}

/// Payload of a `hoverResult` vertex.
#[derive(Debug, Clone, Serialize)]
pub struct HoverContents {
    pub contents: Vec<MarkedString>,
}

/// Whether an `item` edge lists defining or referencing ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemProperty {
    Definitions,
    References,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Vertex,
    Edge,
}

/// One line of the dump: a vertex or an edge with its allocated id.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: u64,
    #[serde(rename = "type")]
    pub element: ElementType,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Vertex(Vertex),
    Edge(Edge),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "label", rename_all = "camelCase")]
pub enum Vertex {
    #[serde(rename_all = "camelCase")]
    MetaData {
        version: String,
        project_root: String,
        position_encoding: String,
        tool_info: ToolInfo,
    },
    Project {
        kind: String,
    },
    #[serde(rename_all = "camelCase")]
    Document {
        uri: String,
        language_id: String,
    },
    Range {
        start: Pos,
        end: Pos,
    },
    ResultSet,
    DefinitionResult,
    ReferenceResult,
    HoverResult {
        result: HoverContents,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "label")]
pub enum Edge {
    #[serde(rename = "next", rename_all = "camelCase")]
    Next { out_v: u64, in_v: u64 },
    #[serde(rename = "textDocument/definition", rename_all = "camelCase")]
    Definition { out_v: u64, in_v: u64 },
    #[serde(rename = "textDocument/references", rename_all = "camelCase")]
    References { out_v: u64, in_v: u64 },
    #[serde(rename = "textDocument/hover", rename_all = "camelCase")]
    Hover { out_v: u64, in_v: u64 },
    #[serde(rename = "item", rename_all = "camelCase")]
    Item {
        out_v: u64,
        in_vs: Vec<u64>,
        document: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        property: Option<ItemProperty>,
    },
    #[serde(rename = "contains", rename_all = "camelCase")]
    Contains { out_v: u64, in_vs: Vec<u64> },
}
