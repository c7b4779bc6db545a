use framepipe_wire::WireError;

/// Errors that can occur on a framed stream.
///
/// Everything here except [`StreamError::Closed`] is fatal for the stream:
/// once the frame boundary is in doubt there is no resynchronization, and
/// the caller should close.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A frame header failed to decode (truncated or unreadable varint).
    #[error("frame header: {0}")]
    Wire(#[from] WireError),

    /// The peer sent a frame type this protocol does not carry.
    #[error("unexpected frame type {got:#x} (only DATA 0x0 is accepted)")]
    UnexpectedFrameType { got: u64 },

    /// The conduit ended while the current frame still owed payload bytes.
    #[error("conduit ended with {missing} payload bytes outstanding")]
    TruncatedFrame { missing: u64 },

    /// The conduit rejected a write.
    #[error("conduit write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// The conduit failed while reading payload bytes.
    #[error("conduit read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was used after `close`.
    #[error("stream is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, StreamError>;
