//! Live adapters for real external interactions.

pub mod clock;
pub mod counter;
pub mod filesystem;

pub use clock::LiveClock;
pub use counter::HttpCounterSource;
pub use filesystem::LiveFileSystem;
