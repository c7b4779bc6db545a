//! Message-oriented framing over a raw byte conduit.
//!
//! A [`FramedStream`] wraps anything that moves ordered, reliable bytes
//! (TCP, Unix sockets, a multiplexed transport leg) and exposes discrete
//! messages: every `write` emits one DATA frame, every `read` delivers
//! payload bytes of the current frame and never crosses into the next
//! frame's header.
//!
//! The layer deliberately does *not* multiplex, flow-control, or retry.
//! Those are conduit or application concerns.

pub mod conduit;
pub mod error;
pub mod stream;

pub use conduit::Conduit;
pub use error::{Result, StreamError};
pub use stream::FramedStream;
