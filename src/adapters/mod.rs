//! Adapter implementations for the port traits.
//!
//! `live` adapters talk to the real world, `recording` adapters wrap live
//! ones and capture interactions to cassettes, `replaying` adapters serve
//! recorded interactions back deterministically.

pub mod live;
pub mod recording;
pub mod replaying;
