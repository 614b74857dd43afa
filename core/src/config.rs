//! Client configuration.
//!
//! Compile-time defaults shared by the CLI and the browser dashboard, plus
//! [`ClientConfig`] which the native client loads from the environment.

use std::time::Duration;

/// Default claims backend base URL.
pub const BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Most photos the `damaged_photos` slot holds.
pub const MAX_DAMAGED_PHOTOS: usize = 5;

/// Size guidance shown next to claim document uploads. Not enforced.
pub const CLAIM_DOC_SIZE_HINT_MB: u32 = 200;

/// Size guidance shown next to workshop uploads. Not enforced.
pub const WORKSHOP_DOC_SIZE_HINT_MB: u32 = 50;

/// Interval between cosmetic progress stages.
pub const STAGE_INTERVAL: Duration = Duration::from_millis(1500);

/// Labels shown while a claim result is "being analysed".
pub const CLAIM_STAGES: [&str; 5] = [
    "Uploading documents",
    "Extracting document data",
    "Verifying policy coverage",
    "Assessing vehicle damage",
    "Preparing claim report",
];

/// Shown instead of an answer when the Q&A call fails.
pub const QA_APOLOGY: &str =
    "Sorry, I couldn't get an answer right now. Please try again in a moment.";

/// Placeholder for absent result fields.
pub const PLACEHOLDER: &str = "—";

/// Environment variable overriding [`BACKEND_URL`].
pub const BACKEND_URL_ENV: &str = "CLAIMDESK_BACKEND_URL";

/// Environment variable for the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "CLAIMDESK_TIMEOUT_SECS";

/// Default request timeout. Claim analysis runs OCR and an LLM, so it is long.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings for the HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL, without trailing slash.
    pub backend_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `url`.
    pub fn with_backend(url: impl Into<String>) -> Self {
        Self {
            backend_url: normalize_base_url(&url.into()),
            ..Self::default()
        }
    }

    /// Load from the environment (and `.env`, if present).
    #[cfg(feature = "native")]
    pub fn from_env() -> Result<Self, crate::error::CliError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            config.backend_url = normalize_base_url(&url);
        }
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                crate::error::CliError::Config(format!("{} must be a number of seconds, got '{}'", TIMEOUT_ENV, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Full URL for an endpoint path such as `/process_claim/`.
    pub fn endpoint(&self, path: &str) -> String {
        endpoint(&self.backend_url, path)
    }
}

/// Join a base URL and an endpoint path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", normalize_base_url(base), path)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::with_backend("http://claims.local:8000/");
        assert_eq!(config.endpoint("/process_claim/"), "http://claims.local:8000/process_claim/");
    }

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint("/health"), "http://127.0.0.1:8000/health");
    }

    #[test]
    fn test_stage_labels_are_five() {
        assert_eq!(CLAIM_STAGES.len(), 5);
        assert!(CLAIM_STAGES.iter().all(|label| !label.is_empty()));
    }
}
