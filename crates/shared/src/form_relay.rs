//! Booking form relay.
//!
//! Every accepted booking is mirrored as JSON to an external form-intake
//! endpoint as a notification side channel. The relay is independent of the
//! store write: a relay failure is logged and never fails the booking.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::FormRelayConfig;

/// Form relay errors.
#[derive(Debug, Error)]
pub enum FormRelayError {
    /// The endpoint could not be reached.
    #[error("form relay request failed: {0}")]
    Request(String),
    /// The endpoint answered with a non-success status.
    #[error("form relay returned status {0}")]
    Status(u16),
}

/// Client for the external form-intake endpoint.
#[derive(Clone, Debug)]
pub struct FormRelay {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl FormRelay {
    /// Creates a relay from configuration.
    #[must_use]
    pub fn new(config: &FormRelayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: config.endpoint.clone().filter(|e| !e.trim().is_empty()),
            client,
        }
    }

    /// Relay with no endpoint; every submission is a no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(&FormRelayConfig::default())
    }

    /// Whether an endpoint is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Posts a submission to the endpoint.
    ///
    /// Returns `Ok(false)` when the relay is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint answers non-2xx.
    pub async fn submit<T: Serialize + Sync>(&self, payload: &T) -> Result<bool, FormRelayError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(false);
        };

        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| FormRelayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FormRelayError::Status(status.as_u16()));
        }
        Ok(true)
    }

    /// Submits in the background, logging the outcome.
    pub fn submit_detached<T>(&self, payload: T)
    where
        T: Serialize + Send + Sync + 'static,
    {
        if !self.is_enabled() {
            return;
        }
        let relay = self.clone();
        tokio::spawn(async move {
            match relay.submit(&payload).await {
                Ok(_) => tracing::debug!("Booking relayed to form endpoint"),
                Err(e) => tracing::warn!(error = %e, "Booking form relay failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_disabled_relay_is_noop() {
        let relay = FormRelay::disabled();
        assert!(!relay.is_enabled());
        assert!(!relay.submit(&json!({"car_name": "Axio"})).await.unwrap());
    }

    #[test]
    fn test_blank_endpoint_disables_relay() {
        let relay = FormRelay::new(&FormRelayConfig {
            endpoint: Some("  ".to_string()),
            timeout_secs: 5,
        });
        assert!(!relay.is_enabled());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let relay = FormRelay::new(&FormRelayConfig {
            endpoint: Some("http://127.0.0.1:9/f/booking".to_string()),
            timeout_secs: 1,
        });
        assert!(matches!(
            relay.submit(&json!({"car_name": "Axio"})).await,
            Err(FormRelayError::Request(_))
        ));
    }
}
