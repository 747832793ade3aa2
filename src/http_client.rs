//! HTTP client construction shared by the API clients.
//!
//! Every client value builds its own `reqwest::Client` with the same
//! timeout, compression and User-Agent policy.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::user_agent;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Connect and read timeouts applied to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTimeouts {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

impl HttpTimeouts {
    #[must_use]
    pub fn new(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        Self {
            connect_timeout_secs,
            read_timeout_secs,
        }
    }
}

/// Builds a client with the crate's timeouts, gzip and User-Agent.
///
/// # Errors
///
/// Returns the underlying `reqwest` error if the TLS backend cannot be initialized.
pub(crate) fn build_http_client(timeouts: HttpTimeouts) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .timeout(Duration::from_secs(timeouts.read_timeout_secs))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
        .build()
}
