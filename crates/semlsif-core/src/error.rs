use std::path::PathBuf;

/// Unified error type for semlsif.
///
/// Every variant is fatal: the driver closes the output and returns the
/// error to its caller. Unresolvable references are not errors (they are
/// recorded in the dump itself).
#[derive(Debug, thiserror::Error)]
pub enum SemlsifError {
    #[error("read {path}: {source}")]
    InputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode {path}: {source}")]
    InputDecode {
        path: PathBuf,
        #[source]
        source: prost::DecodeError,
    },

    #[error("duplicate symbol in {uri}: {symbol}")]
    DuplicateSymbol { uri: String, symbol: String },

    #[error("write output: {0}")]
    OutputIo(#[source] std::io::Error),

    #[error("serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SemlsifError {
    /// Wrap an IO error with the input path it occurred on.
    pub fn input_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SemlsifError::InputIo {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for semlsif operations.
pub type Result<T> = std::result::Result<T, SemlsifError>;
