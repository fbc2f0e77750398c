//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the identifier core and an
//! external system (time, filesystem, the remote sequence counter).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod counter;
pub mod filesystem;

pub use clock::Clock;
pub use counter::{CounterError, CounterFuture, CounterRequest, CounterResponse, CounterSource};
pub use filesystem::FileSystem;
