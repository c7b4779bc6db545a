/// Errors that can occur while encoding or decoding wire values.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The value does not fit in the 62-bit varint range.
    #[error("value {value} out of varint range (max 2^62-1)")]
    ValueOutOfRange { value: u64 },

    /// The byte source ended before a complete encoding was read.
    #[error("byte source ended inside a varint")]
    Truncated,

    /// An I/O error occurred while reading from the byte source.
    #[error("wire I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WireError>;
