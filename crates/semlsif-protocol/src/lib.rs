//! semlsif-protocol: LSIF record model, record sinks, and the typed emitter.
//!
//! The emitter is polymorphic over a [`RecordSink`]: production runs drive a
//! buffered [`JsonSink`] writing newline-delimited JSON, tests drive a
//! [`MemorySink`] that records every entry as a JSON value.

pub mod emitter;
pub mod records;
pub mod sink;

pub use emitter::Emitter;
pub use records::{
    Edge, ElementType, Entry, HoverContents, ItemProperty, MarkedString, Payload, Pos, ToolInfo,
    Vertex, POSITION_ENCODING, PROTOCOL_VERSION,
};
pub use sink::{JsonSink, MemorySink, RecordSink};
