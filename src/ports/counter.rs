//! Counter port for the remote ATL sequence authority.
//!
//! The remote side owns the sequence; this port only reads the highest
//! number already allocated for a period. Reading is not a reservation.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{IdError, Period};

/// Boxed future type alias used by [`CounterSource`] to keep the trait dyn-compatible.
pub type CounterFuture<'a> = Pin<Box<dyn Future<Output = Result<u64, CounterError>> + Send + 'a>>;

/// Body sent to the counter endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRequest {
    /// Two-digit year.
    pub year: String,
    /// Two-digit month.
    pub month: String,
}

impl From<Period> for CounterRequest {
    fn from(period: Period) -> Self {
        Self { year: period.yy(), month: period.mm() }
    }
}

/// Body returned by the counter endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterResponse {
    /// Whether the lookup succeeded.
    pub ok: bool,
    /// Highest number allocated so far; absent for an empty bucket.
    #[serde(default)]
    pub last_number: Option<u64>,
    /// Server-side failure description.
    #[serde(default)]
    pub error: Option<String>,
}

impl CounterResponse {
    /// Interprets the response, defaulting a missing `lastNumber` to zero.
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::Rejected`] when `ok` is false.
    pub fn into_last_number(self) -> Result<u64, CounterError> {
        if !self.ok {
            return Err(CounterError::Rejected(
                self.error.unwrap_or_else(|| "counter lookup failed".to_string()),
            ));
        }
        Ok(self.last_number.unwrap_or(0))
    }
}

/// Failures while reading the remote counter.
#[derive(Debug, Error)]
pub enum CounterError {
    /// The request never produced a response.
    #[error("counter request failed: {0}")]
    Transport(String),
    /// The server answered with a failure status or `ok: false`.
    #[error("counter rejected lookup: {0}")]
    Rejected(String),
    /// The response body could not be decoded.
    #[error("counter response malformed: {0}")]
    Decode(String),
    /// A failure captured in a cassette.
    #[error("{0}")]
    Replayed(String),
}

impl From<CounterError> for IdError {
    fn from(err: CounterError) -> Self {
        IdError::UpstreamUnavailable(err.to_string())
    }
}

/// Reads the highest allocated ATL number for a period.
pub trait CounterSource: Send + Sync {
    /// Fetches `lastNumber` for the given period.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    fn last_number(&self, period: Period) -> CounterFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_last_number_defaults_to_zero() {
        let response: CounterResponse = serde_json::from_value(json!({"ok": true})).unwrap();
        assert_eq!(response.into_last_number().unwrap(), 0);
    }

    #[test]
    fn ok_response_yields_last_number() {
        let response: CounterResponse =
            serde_json::from_value(json!({"ok": true, "lastNumber": 57})).unwrap();
        assert_eq!(response.into_last_number().unwrap(), 57);
    }

    #[test]
    fn not_ok_is_rejected_with_server_message() {
        let response: CounterResponse =
            serde_json::from_value(json!({"ok": false, "error": "db down"})).unwrap();
        let err = response.into_last_number().unwrap_err();
        assert!(matches!(err, CounterError::Rejected(ref msg) if msg == "db down"));
    }

    #[test]
    fn counter_error_maps_to_upstream_unavailable() {
        let err: IdError = CounterError::Transport("connection refused".into()).into();
        assert!(matches!(err, IdError::UpstreamUnavailable(ref msg) if msg.contains("connection refused")));
    }

    #[test]
    fn request_uses_two_digit_parts() {
        let request = CounterRequest::from(Period::new(2025, 4).unwrap());
        assert_eq!(serde_json::to_value(request).unwrap(), json!({"year": "25", "month": "04"}));
    }
}
