//! Record sinks: where emitted LSIF entries go.

use crate::records::Entry;
use semlsif_core::{Result, SemlsifError};
use std::io::Write;

/// Capability interface the emitter writes through.
///
/// Write failures are latched by the sink and surfaced by [`RecordSink::flush`];
/// the emitter itself never observes per-record errors.
pub trait RecordSink {
    /// Accept one record.
    fn write(&mut self, entry: &Entry);

    /// Flush buffered output, returning the first error latched by any
    /// earlier write.
    fn flush(&mut self) -> Result<()>;
}

/// Size of the buffer wrapping the output writer.
const WRITE_BUFFER_SIZE: usize = 4096;

/// Buffered sink producing one compact JSON object per line.
///
/// The first write or serialization error is latched; subsequent writes are
/// no-ops and the latched error is returned by the final flush. Not
/// thread-safe; driven by a single caller.
pub struct JsonSink<W: Write> {
    out: std::io::BufWriter<W>,
    err: Option<SemlsifError>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out: std::io::BufWriter::with_capacity(WRITE_BUFFER_SIZE, inner),
            err: None,
        }
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write(&mut self, entry: &Entry) {
        if self.err.is_some() {
            return;
        }
        if let Err(e) = serde_json::to_writer(&mut self.out, entry) {
            self.err = Some(SemlsifError::Serialize(e));
            return;
        }
        if let Err(e) = self.out.write_all(b"\n") {
            self.err = Some(SemlsifError::OutputIo(e));
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(err) = self.err.take() {
            return Err(err);
        }
        self.out.flush().map_err(SemlsifError::OutputIo)
    }
}

/// In-memory sink recording every entry as a JSON value.
///
/// Used by test suites to assert on the emitted record stream without going
/// through an output file.
#[derive(Default)]
pub struct MemorySink {
    pub entries: Vec<serde_json::Value>,
    err: Option<SemlsifError>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write(&mut self, entry: &Entry) {
        if self.err.is_some() {
            return;
        }
        match serde_json::to_value(entry) {
            Ok(value) => self.entries.push(value),
            Err(e) => self.err = Some(SemlsifError::Serialize(e)),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ElementType, Payload, Vertex};

    fn result_set(id: u64) -> Entry {
        Entry {
            id,
            element: ElementType::Vertex,
            payload: Payload::Vertex(Vertex::ResultSet),
        }
    }

    #[test]
    fn json_sink_writes_one_object_per_line() {
        let mut buf = Vec::new();
        {
            let mut sink = JsonSink::new(&mut buf);
            sink.write(&result_set(1));
            sink.write(&result_set(2));
            sink.flush().unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["label"], "resultSet");
    }

    /// Writer that fails every write, to exercise error latching.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn json_sink_latches_first_error_and_reports_it_at_flush() {
        // A tiny buffer capacity is not configurable, so force the failure
        // through flush: fill past the 4 KiB buffer so writes hit the writer.
        let mut sink = JsonSink::new(FailingWriter);
        for i in 0..512 {
            sink.write(&result_set(i));
        }
        let err = sink.flush().expect_err("flush must report the write failure");
        // The underlying IO failure surfaces either directly or through the
        // serializer, depending on where the buffer spilled.
        assert!(matches!(
            err,
            SemlsifError::OutputIo(_) | SemlsifError::Serialize(_)
        ));

        // The error was taken; a second flush still fails on the writer itself
        // or succeeds with nothing buffered, but must not panic.
        let _ = sink.flush();
    }

    #[test]
    fn memory_sink_records_entries_in_order() {
        let mut sink = MemorySink::new();
        sink.write(&result_set(1));
        sink.write(&result_set(2));
        sink.flush().unwrap();
        assert_eq!(sink.entries.len(), 2);
        assert_eq!(sink.entries[0]["id"], 1);
        assert_eq!(sink.entries[1]["id"], 2);
    }
}
