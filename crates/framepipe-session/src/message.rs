use framepipe_stream::{Conduit, FramedStream};

use crate::error::Result;

const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Receive one whole message (one frame), blocking.
///
/// A frame larger than the internal chunk is reassembled across as many
/// stream reads as it takes. Returns `Ok(None)` on clean end-of-stream; an
/// empty message comes back as `Ok(Some(vec![]))`, which is a different
/// outcome.
pub fn read_message<C: Conduit>(stream: &mut FramedStream<C>) -> Result<Option<Vec<u8>>> {
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    let first = match stream.read(&mut chunk)? {
        Some(n) => n,
        None => return Ok(None),
    };

    let mut message = Vec::with_capacity(first);
    message.extend_from_slice(&chunk[..first]);

    while stream.remaining_in_frame() > 0 {
        match stream.read(&mut chunk)? {
            Some(n) => message.extend_from_slice(&chunk[..n]),
            // Mid-frame, a read yields bytes or fails with TruncatedFrame;
            // it never reports end-of-stream.
            None => unreachable!("end-of-stream reported mid-frame"),
        }
    }

    Ok(Some(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn reassembles_message_larger_than_chunk() {
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();

        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let payload_clone = payload.clone();
        let writer = std::thread::spawn(move || {
            let mut stream = FramedStream::open(left);
            stream.write(&payload_clone).unwrap();
            stream.close().unwrap();
        });

        let mut reader = FramedStream::open(right);
        let message = read_message(&mut reader).unwrap().unwrap();
        assert_eq!(message, payload);
        assert_eq!(read_message(&mut reader).unwrap(), None);

        writer.join().unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn truncation_mid_message_is_an_error_not_eof() {
        use std::io::Write;

        use framepipe_stream::StreamError;

        use crate::error::SessionError;

        let (mut left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        // DATA header declaring 50 bytes, only 10 delivered.
        left.write_all(&[0x00, 0x32]).unwrap();
        left.write_all(&[0xAA; 10]).unwrap();
        left.shutdown(std::net::Shutdown::Write).unwrap();

        let mut reader = FramedStream::open(right);
        let err = read_message(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Stream(StreamError::TruncatedFrame { missing: 40 })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn empty_message_is_not_end_of_stream() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = FramedStream::open(left);
        writer.write(b"").unwrap();
        writer.close().unwrap();

        let mut reader = FramedStream::open(right);
        assert_eq!(read_message(&mut reader).unwrap(), Some(Vec::new()));
        assert_eq!(read_message(&mut reader).unwrap(), None);
    }
}
