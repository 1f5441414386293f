//! Human verification challenge client.
//!
//! Booking and daily-report submissions carry a challenge token obtained by
//! the browser. The token is checked with a reCAPTCHA-style `siteverify`
//! endpoint before any store mutation happens.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::CaptchaConfig;

/// Challenge verification errors.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// No token was supplied.
    #[error("challenge token is missing")]
    MissingToken,
    /// The provider rejected the token.
    #[error("challenge was not completed: {0}")]
    Rejected(String),
    /// The provider could not be reached or answered garbage.
    #[error("challenge provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Verifies challenge tokens against the configured provider.
#[derive(Clone)]
pub struct CaptchaVerifier {
    config: CaptchaConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for CaptchaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptchaVerifier")
            .field("enabled", &self.config.enabled)
            .field("verify_url", &self.config.verify_url)
            .finish_non_exhaustive()
    }
}

impl CaptchaVerifier {
    /// Creates a verifier for the given configuration.
    #[must_use]
    pub fn new(config: CaptchaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Verifier that accepts any non-empty token.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(CaptchaConfig {
            enabled: false,
            ..CaptchaConfig::default()
        })
    }

    /// Whether tokens are actually checked with the provider.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Verifies a challenge token.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::MissingToken` for an empty token (even when disabled),
    /// `CaptchaError::Rejected` when the provider says no, and
    /// `CaptchaError::Unavailable` when the provider cannot be reached.
    pub async fn verify(&self, token: &str) -> Result<(), CaptchaError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CaptchaError::MissingToken);
        }
        if !self.config.enabled {
            return Ok(());
        }

        let response: VerifyResponse = self
            .client
            .post(&self.config.verify_url)
            .form(&[("secret", self.config.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?;

        if response.success {
            Ok(())
        } else {
            tracing::debug!(error_codes = ?response.error_codes, "Challenge token rejected");
            Err(CaptchaError::Rejected(response.error_codes.join(",")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_verifier_accepts_token() {
        let verifier = CaptchaVerifier::disabled();
        assert!(!verifier.is_enabled());
        assert!(verifier.verify("any-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_token_rejected_even_when_disabled() {
        let verifier = CaptchaVerifier::disabled();
        assert!(matches!(
            verifier.verify("   ").await,
            Err(CaptchaError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        let verifier = CaptchaVerifier::new(CaptchaConfig {
            enabled: true,
            verify_url: "http://127.0.0.1:9/siteverify".to_string(),
            secret: "secret".to_string(),
            timeout_secs: 1,
        });

        assert!(matches!(
            verifier.verify("token").await,
            Err(CaptchaError::Unavailable(_))
        ));
    }

    #[test]
    fn test_verify_response_parses_error_codes() {
        let parsed: VerifyResponse =
            serde_json::from_str(r#"{"success":false,"error-codes":["timeout-or-duplicate"]}"#)
                .unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error_codes, vec!["timeout-or-duplicate"]);
    }
}
