use std::fmt;
use std::io;

use framepipe_session::SessionError;
use framepipe_stream::StreamError;
use framepipe_wire::WireError;

// Sysexits-style exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PROTOCOL_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn stream_error(context: &str, err: StreamError) -> CliError {
    match err {
        StreamError::Io(source) | StreamError::WriteFailed(source) => io_error(context, source),
        StreamError::Wire(WireError::Io(source)) => io_error(context, source),
        err @ (StreamError::Wire(_)
        | StreamError::UnexpectedFrameType { .. }
        | StreamError::TruncatedFrame { .. }) => {
            CliError::new(PROTOCOL_ERROR, format!("{context}: {err}"))
        }
        err @ StreamError::Closed => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::Stream(err) => stream_error(context, err),
        err @ SessionError::PeerVanished { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}
