use std::cmp;
use std::io::ErrorKind;

use bytes::BytesMut;
use tracing::{debug, trace};

use framepipe_wire::{FrameHeader, MAX_HEADER_LEN};

use crate::conduit::Conduit;
use crate::error::{Result, StreamError};

/// A message-oriented stream over a raw byte conduit.
///
/// Writes prepend a DATA frame header to each payload. Reads deliver payload
/// bytes of one frame at a time: the decoder remembers how many bytes of the
/// current frame are still owed, so a frame larger than the caller's buffer
/// is drained across calls without ever re-parsing or skipping a header.
///
/// One instance is single-threaded and blocking. The conduit is exclusively
/// owned and released when the stream is closed or dropped.
pub struct FramedStream<C: Conduit> {
    conduit: C,
    /// Payload bytes of the current frame not yet delivered to the caller.
    /// Zero means the next read must parse a header first.
    remaining_in_frame: u64,
    closed: bool,
}

impl<C: Conduit> FramedStream<C> {
    /// Take ownership of a conduit and begin framing over it.
    pub fn open(conduit: C) -> Self {
        Self {
            conduit,
            remaining_in_frame: 0,
            closed: false,
        }
    }

    /// Send one payload as one complete DATA frame.
    ///
    /// Header and payload go out as a single buffered send; the conduit may
    /// fragment it further, ordering is its guarantee. There is no message
    /// fragmentation across calls and no internal retry — a failed write is
    /// surfaced as [`StreamError::WriteFailed`] and the stream should be
    /// closed.
    pub fn write(&mut self, payload: &[u8]) -> Result<()> {
        self.ensure_open()?;

        let header = FrameHeader::data(payload.len() as u64);
        let mut buf = BytesMut::with_capacity(MAX_HEADER_LEN + payload.len());
        header.encode(&mut buf)?;
        buf.extend_from_slice(payload);

        let mut offset = 0usize;
        while offset < buf.len() {
            match self.conduit.write(&buf[offset..]) {
                Ok(0) => {
                    return Err(StreamError::WriteFailed(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "conduit accepted no bytes",
                    )))
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(StreamError::WriteFailed(err)),
            }
        }
        self.flush()?;

        trace!(len = payload.len(), "frame written");
        Ok(())
    }

    /// Receive payload bytes into `buf`.
    ///
    /// Returns `Ok(None)` on clean end-of-stream (the conduit ended with no
    /// frame in progress) and `Ok(Some(n))` when `n` payload bytes were
    /// delivered. A zero-length frame yields `Ok(Some(0))`, which is how an
    /// empty message stays distinguishable from termination.
    ///
    /// A new header is parsed only when the previous frame is fully drained;
    /// a non-DATA type or a conduit that ends mid-frame is fatal.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        self.ensure_open()?;

        // An empty buffer can observe nothing; don't touch the conduit, a
        // zero-byte read there would be indistinguishable from EOF.
        if buf.is_empty() {
            return Ok(Some(0));
        }

        if self.remaining_in_frame == 0 {
            let first = match self.read_byte_or_eof()? {
                Some(byte) => byte,
                None => {
                    debug!("conduit ended between frames");
                    return Ok(None);
                }
            };
            let (header, _) = FrameHeader::decode_after_first(first, &mut self.conduit)?;
            if !header.is_data() {
                return Err(StreamError::UnexpectedFrameType {
                    got: header.frame_type,
                });
            }
            trace!(length = header.length, "frame header parsed");
            self.remaining_in_frame = header.length;
            if header.length == 0 {
                return Ok(Some(0));
            }
        }

        let want = cmp::min(self.remaining_in_frame, buf.len() as u64) as usize;
        let got = loop {
            match self.conduit.read(&mut buf[..want]) {
                Ok(0) => {
                    return Err(StreamError::TruncatedFrame {
                        missing: self.remaining_in_frame,
                    })
                }
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        };
        self.remaining_in_frame -= got as u64;
        Ok(Some(got))
    }

    /// Close the owned conduit. Idempotent; later reads and writes fail
    /// with [`StreamError::Closed`].
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        // Mark first so the conduit is never released twice, even if the
        // close itself errors.
        self.closed = true;
        self.conduit.close().map_err(StreamError::Io)?;
        debug!("framed stream closed");
        Ok(())
    }

    /// Payload bytes still owed by the frame currently being drained.
    pub fn remaining_in_frame(&self) -> u64 {
        self.remaining_in_frame
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Borrow the underlying conduit.
    pub fn get_ref(&self) -> &C {
        &self.conduit
    }

    /// Mutably borrow the underlying conduit.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.conduit
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        loop {
            match self.conduit.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(StreamError::WriteFailed(err)),
            }
        }
    }

    /// Read the first byte of the next header, or `None` on clean EOF.
    fn read_byte_or_eof(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.conduit.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
    }
}

impl<C: Conduit> Drop for FramedStream<C> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.conduit.close();
        }
    }
}
