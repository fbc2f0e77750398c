//! Adapter implementations of the port traits.
//!
//! - `live`: real clock, disk, and HTTP counter.
//! - `recording`: wrap a live adapter and capture each call to a cassette.
//! - `replaying`: serve calls back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
