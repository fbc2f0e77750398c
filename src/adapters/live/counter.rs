//! Live adapter for the `CounterSource` port using the lab management API.

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::ids::Period;
use crate::ports::counter::{
    CounterError, CounterFuture, CounterRequest, CounterResponse, CounterSource,
};

/// Reads the ATL counter over HTTP.
///
/// One `POST` per lookup; no retries. Retry and backoff belong to the caller.
pub struct HttpCounterSource {
    client: Client,
    url: String,
}

impl HttpCounterSource {
    /// Creates a client for the counter endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, CounterError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CounterError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, url: config.counter_url() })
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CounterSource for HttpCounterSource {
    fn last_number(&self, period: Period) -> CounterFuture<'_> {
        let body = CounterRequest::from(period);

        Box::pin(async move {
            debug!(url = %self.url, year = %body.year, month = %body.month, "fetching ATL counter");

            let response = self.client.post(&self.url).json(&body).send().await.map_err(|e| {
                warn!(url = %self.url, error = %e, "ATL counter request failed");
                CounterError::Transport(e.to_string())
            })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| CounterError::Transport(format!("failed to read response: {e}")))?;

            if !status.is_success() {
                let msg = serde_json::from_str::<CounterResponse>(&text)
                    .ok()
                    .and_then(|r| r.error)
                    .unwrap_or(text);
                warn!(status = status.as_u16(), "ATL counter rejected lookup");
                return Err(CounterError::Rejected(format!("HTTP {}: {msg}", status.as_u16())));
            }

            let parsed: CounterResponse =
                serde_json::from_str(&text).map_err(|e| CounterError::Decode(e.to_string()))?;
            let last = parsed.into_last_number()?;
            debug!(last_number = last, "ATL counter fetched");
            Ok(last)
        })
    }
}
