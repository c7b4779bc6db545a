//! Message framing for ordered byte streams.
//!
//! framepipe turns any ordered, reliable byte conduit into a sequence of
//! discrete messages using an HTTP/3-style DATA frame encoding:
//! `[varint type][varint length][payload]`.
//!
//! # Crate Structure
//!
//! - [`wire`] — varint codec and frame header types
//! - [`stream`] — the framed stream over a raw conduit
//! - [`session`] — keep-alive exchange and whole-message helpers

/// Re-export wire codec types.
pub mod wire {
    pub use framepipe_wire::*;
}

/// Re-export framed stream types.
pub mod stream {
    pub use framepipe_stream::*;
}

/// Re-export session types.
pub mod session {
    pub use framepipe_session::*;
}
