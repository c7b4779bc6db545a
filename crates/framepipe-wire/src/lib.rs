//! Wire-level codec for framepipe.
//!
//! Two pure building blocks, no transport knowledge:
//! - [`varint`] — QUIC-style variable-length integers (2-bit width prefix,
//!   big-endian value bits, 1/2/4/8-byte widths)
//! - [`frame`] — the `[varint type][varint length]` frame header
//!
//! Everything above this crate (stream state, conduits, sessions) lives in
//! `framepipe-stream` and `framepipe-session`.

pub mod error;
pub mod frame;
pub mod varint;

pub use error::{Result, WireError};
pub use frame::{FrameHeader, FRAME_TYPE_DATA, MAX_HEADER_LEN};
