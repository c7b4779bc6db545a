use framepipe_stream::StreamError;

/// Errors that can occur while running a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The underlying framed stream failed.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// The peer ended the stream while the driver still expected a reply.
    #[error("peer ended the stream mid-exchange (round {round} of {total})")]
    PeerVanished { round: u32, total: u32 },
}

pub type Result<T> = std::result::Result<T, SessionError>;
