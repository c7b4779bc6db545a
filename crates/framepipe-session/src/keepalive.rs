use std::time::Duration;

use framepipe_stream::{Conduit, FramedStream};
use tracing::{debug, trace};

use crate::error::{Result, SessionError};
use crate::message::read_message;

/// Default keep-alive request payload.
pub const DEFAULT_PAYLOAD: &[u8] = b"PING";
/// Default responder reply payload.
pub const DEFAULT_REPLY: &[u8] = b"PONG";

/// How the driving side paces its keep-alive rounds.
#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    /// Rounds to run before finishing.
    pub count: u32,
    /// Pause between rounds (not after the last one).
    pub interval: Duration,
    /// Payload sent each round.
    pub payload: Vec<u8>,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            count: 10,
            interval: Duration::from_secs(1),
            payload: DEFAULT_PAYLOAD.to_vec(),
        }
    }
}

/// Drive a fixed-count keep-alive exchange: send the payload, wait for one
/// reply, repeat. Returns the replies in order.
///
/// A peer that ends the stream before replying is an error for the driver;
/// it promised one reply per round.
pub fn drive<C: Conduit>(
    stream: &mut FramedStream<C>,
    config: &KeepAliveConfig,
) -> Result<Vec<Vec<u8>>> {
    let mut replies = Vec::with_capacity(config.count as usize);

    for round in 1..=config.count {
        stream.write(&config.payload)?;
        debug!(round, total = config.count, "keep-alive sent");

        match read_message(stream)? {
            Some(reply) => {
                trace!(round, len = reply.len(), "reply received");
                replies.push(reply);
            }
            None => {
                return Err(SessionError::PeerVanished {
                    round,
                    total: config.count,
                })
            }
        }

        if round < config.count && !config.interval.is_zero() {
            std::thread::sleep(config.interval);
        }
    }

    Ok(replies)
}

/// Answer every incoming message with `reply` until the peer ends the
/// stream cleanly. Returns the number of messages answered.
pub fn respond<C: Conduit>(stream: &mut FramedStream<C>, reply: &[u8]) -> Result<u64> {
    let mut answered = 0u64;

    while let Some(message) = read_message(stream)? {
        trace!(len = message.len(), "message received");
        stream.write(reply)?;
        answered += 1;
    }

    debug!(answered, "peer finished, session over");
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(count: u32) -> KeepAliveConfig {
        KeepAliveConfig {
            count,
            interval: Duration::ZERO,
            ..KeepAliveConfig::default()
        }
    }

    #[test]
    #[cfg(unix)]
    fn full_exchange_over_socket_pair() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();

        let responder = std::thread::spawn(move || {
            let mut stream = FramedStream::open(right);
            respond(&mut stream, DEFAULT_REPLY).unwrap()
        });

        let mut stream = FramedStream::open(left);
        let replies = drive(&mut stream, &fast_config(3)).unwrap();
        stream.close().unwrap();

        assert_eq!(replies.len(), 3);
        assert!(replies.iter().all(|r| r == DEFAULT_REPLY));
        assert_eq!(responder.join().unwrap(), 3);
    }

    #[test]
    #[cfg(unix)]
    fn driver_errors_when_peer_vanishes() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();

        // Peer consumes the first message, then hangs up without replying.
        let peer = std::thread::spawn(move || {
            let mut stream = FramedStream::open(right);
            read_message(&mut stream).unwrap();
            stream.close().unwrap();
        });

        let mut stream = FramedStream::open(left);
        let err = drive(&mut stream, &fast_config(2)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::PeerVanished { round: 1, total: 2 }
        ));

        peer.join().unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn responder_echoes_custom_reply() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();

        let responder = std::thread::spawn(move || {
            let mut stream = FramedStream::open(right);
            respond(&mut stream, b"still here").unwrap()
        });

        let mut stream = FramedStream::open(left);
        let config = KeepAliveConfig {
            payload: b"you alive?".to_vec(),
            ..fast_config(1)
        };
        let replies = drive(&mut stream, &config).unwrap();
        stream.close().unwrap();

        assert_eq!(replies, vec![b"still here".to_vec()]);
        assert_eq!(responder.join().unwrap(), 1);
    }
}
