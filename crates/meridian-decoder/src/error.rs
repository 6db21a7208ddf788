use meridian_wire::CodecError;

/// Errors that make a single record undecodable.
///
/// All of these are local to one record (one line, or one whole document
/// for document-framed sources). The streaming session logs them, skips
/// the record and keeps going.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── Codec(CodecError)     ← bad digit, partial group, overflow
///   ├── OddCoordinateCount    ← ring stream with a lone trailing value
///   ├── MissingClassification ← polyline record without a leading digit
///   ├── InvalidFlowByte       ← byte in neither flow alphabet
///   ├── OrphanFlowValue       ← flow value token with no index before it
///   ├── UnterminatedToken     ← index token with no value after it
///   ├── Document(serde_json)  ← topology container is not valid JSON
///   ├── ArcOutOfRange         ← geometry references a missing arc
///   ├── MissingObject         ← configured object name not in topology
///   └── NoObjects             ← topology has no objects at all
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A ring decoded to an odd number of integers, so the last longitude
    /// has no latitude.
    #[error("ring {ring} has an odd number of coordinate values ({count})")]
    OddCoordinateCount { ring: usize, count: usize },

    #[error("record does not start with a classification digit")]
    MissingClassification,

    #[error("byte {byte:#04X} at offset {offset} is in neither flow alphabet")]
    InvalidFlowByte { offset: usize, byte: u8 },

    #[error("flow value at offset {offset} has no preceding index token")]
    OrphanFlowValue { offset: usize },

    #[error("index token at offset {offset} is not followed by a flow value")]
    UnterminatedToken { offset: usize },

    #[error("invalid topology document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("arc index {index} out of range ({arcs} arcs)")]
    ArcOutOfRange { index: i64, arcs: usize },

    #[error("topology has no object named {0:?}")]
    MissingObject(String),

    #[error("topology has no objects")]
    NoObjects,
}

/// Misuse of a session's lifecycle. These are returned to the caller
/// immediately and nothing is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// `feed_chunk` or `finish` after the session completed.
    #[error("session is closed")]
    Closed,

    /// A session method was called from inside one of its own batch
    /// callbacks.
    #[error("session was re-entered while emitting a batch")]
    ConcurrentMutation,

    /// The worker task behind a session handle has stopped.
    #[error("session worker is no longer running")]
    WorkerGone,
}
