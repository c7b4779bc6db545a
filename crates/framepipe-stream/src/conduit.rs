use std::io::{self, Read, Write};

/// An ordered, reliable, bidirectional byte transport.
///
/// The conduit promises byte ordering and delivery only — no message
/// boundaries, no framing. [`FramedStream`](crate::FramedStream) takes
/// exclusive ownership of its conduit and closes it exactly once.
///
/// Timeouts and cancellation are conduit concerns; the framing layer
/// imposes none of its own.
pub trait Conduit: Read + Write {
    /// Close both directions of the transport.
    fn close(&mut self) -> io::Result<()>;
}

impl Conduit for std::net::TcpStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(std::net::Shutdown::Both) {
            // Peer already gone; nothing left to release.
            Err(err) if err.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

#[cfg(unix)]
impl Conduit for std::os::unix::net::UnixStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(std::net::Shutdown::Both) {
            Err(err) if err.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
