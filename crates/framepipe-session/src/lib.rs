//! Application layer over framed streams.
//!
//! Two roles: a driver that sends a fixed number of keep-alive messages and
//! waits for one reply each round, and a responder that answers every
//! incoming message until the peer ends the stream. Plus [`read_message`],
//! which drains exactly one frame however many reads it takes.

pub mod error;
pub mod keepalive;
pub mod message;

pub use error::{Result, SessionError};
pub use keepalive::{drive, respond, KeepAliveConfig, DEFAULT_PAYLOAD, DEFAULT_REPLY};
pub use message::read_message;
