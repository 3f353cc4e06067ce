//! HTTP client construction for upstream services

use std::time::Duration;

/// User-Agent sent to upstream services
pub const USER_AGENT: &str = concat!("quiz-relay/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest` client with a whole-request timeout
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(USER_AGENT)
        .build()
}
