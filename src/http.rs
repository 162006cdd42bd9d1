//! Shared HTTP client configuration with sensible defaults.

use std::time::Duration;

/// Default timeout for upstream API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an HTTP client with configured timeout.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client() -> reqwest::Client {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}
