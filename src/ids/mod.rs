//! Identifier generation for tests, material batches, and lab reports.
//!
//! Every function here is pure: the same inputs always produce the same
//! identifier. Sequence numbers come from the caller (ultimately from the
//! remote counter), and nothing in this module reserves or persists them.

mod material;
mod period;
mod test_id;
mod ulr;

pub use material::{format_tests_with_ids, generate_material_ids, FormattedBatch, FormattedTest, TestRecord};
pub use period::{parse_timestamp, Period};
pub use test_id::{generate_test_id, test_id_for_period};
pub use ulr::{generate_ulr, ulr_at, ULR_LEN};

use thiserror::Error;

/// Errors raised while generating identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The remote counter could not be fetched.
    #[error("sequence counter unavailable: {0}")]
    UpstreamUnavailable(String),
    /// An argument was out of range or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl IdError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Fixed prefixes and suffixes stamped onto generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFormat {
    /// Organisational prefix for test and ATL IDs (e.g. `ATL`).
    pub prefix: String,
    /// Prefix for unique lab report numbers (e.g. `TC8749`).
    pub ulr_prefix: String,
    /// Trailing letter for unique lab report numbers.
    pub ulr_suffix: String,
}

impl Default for IdFormat {
    fn default() -> Self {
        Self { prefix: "ATL".into(), ulr_prefix: "TC8749".into(), ulr_suffix: "F".into() }
    }
}
