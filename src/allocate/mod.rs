//! Allocation workflow: clock and counter lookups feeding the pure generators.
//!
//! The counter value is read, not reserved. Two allocators reading the same
//! `lastNumber` produce the same candidates; the remote store must reject
//! the loser when the records are persisted.

use chrono::Datelike;
use tracing::{info, warn};

use crate::context::ServiceContext;
use crate::ids::{
    format_tests_with_ids, generate_material_ids, generate_test_id, parse_timestamp, ulr_at,
    FormattedBatch, IdError, Period, TestRecord,
};

/// Issues identifiers using the ports of a [`ServiceContext`].
pub struct Allocator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Allocator<'a> {
    /// Creates an allocator over the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Test ID for a submission made now.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if the count overflows.
    pub fn next_test_id(&self, existing_test_count: u64) -> Result<String, IdError> {
        generate_test_id(&self.ctx.format, existing_test_count, self.ctx.clock.now())
    }

    /// Test ID for a submission registered at `at` (RFC 3339). The month
    /// is taken in the offset `at` was written with.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] for a malformed timestamp or an
    /// overflowing count.
    pub fn test_id_at(&self, existing_test_count: u64, at: &str) -> Result<String, IdError> {
        generate_test_id(&self.ctx.format, existing_test_count, parse_timestamp(at)?)
    }

    /// Reads `lastNumber` for `period` from the remote counter.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::UpstreamUnavailable`] if the lookup fails.
    pub async fn last_number(&self, period: Period) -> Result<u64, IdError> {
        self.ctx.counter.last_number(period).await.map_err(|e| {
            warn!(%period, error = %e, "ATL counter unavailable; no IDs issued");
            IdError::from(e)
        })
    }

    /// Fetches the counter for an explicit period and issues `count` ATL IDs.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::UpstreamUnavailable`] if the counter lookup fails,
    /// or [`IdError::InvalidInput`] for a zero count.
    pub async fn material_ids_in(&self, count: usize, period: Period) -> Result<Vec<String>, IdError> {
        if count == 0 {
            return Err(IdError::InvalidInput("material count must be positive".into()));
        }
        let last = self.last_number(period).await?;
        let ids = generate_material_ids(&self.ctx.format, count, last, period)?;
        info!(%period, last_number = last, issued = ids.len(), "ATL IDs generated");
        Ok(ids)
    }

    /// Issues `count` ATL IDs in the current month.
    ///
    /// # Errors
    ///
    /// See [`Allocator::material_ids_in`].
    pub async fn material_ids(&self, count: usize) -> Result<Vec<String>, IdError> {
        self.material_ids_in(count, Period::of(self.ctx.clock.now())).await
    }

    /// Stamps a batch of tests submitted now.
    ///
    /// The clock is read once so the test ID and ATL IDs share a month.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::UpstreamUnavailable`] if the counter lookup fails,
    /// or [`IdError::InvalidInput`] for an empty batch or blank material.
    pub async fn format_tests(
        &self,
        tests: Vec<TestRecord>,
        existing_test_count: u64,
    ) -> Result<FormattedBatch, IdError> {
        if tests.is_empty() {
            return Err(IdError::InvalidInput("no tests to format".into()));
        }
        let period = Period::of(self.ctx.clock.now());
        let last = self.last_number(period).await?;
        let batch = format_tests_with_ids(&self.ctx.format, tests, existing_test_count, last, period)?;
        info!(
            test_id = %batch.test_id,
            materials = batch.material_ids.len(),
            tests = batch.formatted_tests.len(),
            "test batch formatted"
        );
        Ok(batch)
    }

    /// ULR for a report created at `created_at` (RFC 3339), or now.
    ///
    /// The year defaults to the creation year in the offset `created_at`
    /// was written with.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] for a malformed timestamp.
    pub fn ulr(&self, created_at: Option<&str>, year: Option<i32>) -> Result<String, IdError> {
        let instant = match created_at {
            Some(text) => parse_timestamp(text)?,
            None => self.ctx.clock.now().fixed_offset(),
        };
        let year = year.unwrap_or_else(|| instant.year());
        Ok(ulr_at(&self.ctx.format, year, instant))
    }
}
