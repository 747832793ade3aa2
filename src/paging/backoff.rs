//! Rate-limit backoff for paged API requests.
//!
//! This module provides the [`BackoffPolicy`] and [`FailureType`] types that
//! decide whether a failed page request is retried, and how long to wait.
//!
//! # Overview
//!
//! A failed request is classified by HTTP status into a [`FailureType`]:
//! - [`FailureType::RateLimited`] - HTTP 429, retried while attempts remain
//! - [`FailureType::NeedsAuth`] - HTTP 401/403, never retried
//! - [`FailureType::Permanent`] - anything else, never retried
//!
//! For rate-limited requests the wait is the server's `Retry-After` value
//! clamped to `[1s, 60s]`, or `min(2^attempt, 60)` seconds when the header is
//! absent or unparseable. A fixed 100ms margin is added on top.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use festival_sync_core::paging::{BackoffPolicy, FailureType, RetryDecision, classify_status};
//!
//! let policy = BackoffPolicy::default();
//! let failure = classify_status(Some(429));
//!
//! match policy.should_retry(failure, 1, None) {
//!     RetryDecision::Retry { delay, attempt, .. } => {
//!         assert_eq!(delay, Duration::from_millis(2100));
//!         assert_eq!(attempt, 2);
//!     }
//!     RetryDecision::DoNotRetry { reason } => panic!("unexpected: {reason}"),
//! }
//! ```

use std::time::Duration;

use tracing::{debug, instrument};

/// Default maximum attempts per page (including the first one).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Exponential backoff base (doubles each attempt).
const BACKOFF_BASE: u64 = 2;

/// Upper bound for any wait, computed or server-provided.
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);

/// Lower bound applied to server-provided waits.
const MIN_SERVER_WAIT: Duration = Duration::from_secs(1);

/// Margin added to every wait so the retry lands after the window reopens.
const SAFETY_MARGIN: Duration = Duration::from_millis(100);

/// Classification of page request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Server rate limiting (HTTP 429). Retried with backoff.
    RateLimited,

    /// Token missing, expired or lacking scope (HTTP 401/403).
    NeedsAuth,

    /// Everything else: network failures, server errors, bad requests.
    Permanent,
}

/// Where a retry delay came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitSource {
    /// The server's `Retry-After` header.
    RetryAfter,
    /// Exponential backoff computed locally.
    Backoff,
}

/// Decision on whether to retry a failed page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the same page after the delay.
    Retry {
        /// Total sleep before the next attempt, margin included.
        delay: Duration,
        /// Which attempt number this will be (1-indexed, so first retry is attempt 2).
        attempt: u32,
        /// Whether the delay was server-provided or computed.
        source: WaitSource,
    },

    /// Give up and surface the error.
    DoNotRetry {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Retry budget and wait bounds for rate-limited page requests.
///
/// # Default Values
///
/// - `max_attempts`: 3
/// - `max_wait`: 60 seconds
/// - `safety_margin`: 100 milliseconds
///
/// With defaults and no `Retry-After` header, a page that keeps returning 429
/// is attempted three times with waits of 2.1s and 4.1s in between.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Maximum number of attempts (including the initial attempt).
    max_attempts: u32,

    /// Maximum wait cap.
    max_wait: Duration,

    /// Added to every wait.
    safety_margin: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            max_wait: DEFAULT_MAX_WAIT,
            safety_margin: SAFETY_MARGIN,
        }
    }
}

impl BackoffPolicy {
    /// Creates a policy with custom bounds.
    ///
    /// `max_attempts` below 1 is raised to 1; `max_wait` below the 1s floor is
    /// raised to the floor.
    #[must_use]
    pub fn new(max_attempts: u32, max_wait: Duration, safety_margin: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            max_wait: max_wait.max(MIN_SERVER_WAIT),
            safety_margin,
        }
    }

    /// Creates a policy with a custom attempt budget and default wait bounds.
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decides whether to retry after `attempt` failed attempts.
    ///
    /// # Arguments
    ///
    /// * `failure_type` - Classification of the failure
    /// * `attempt` - Number of attempts made so far for this page (1-indexed)
    /// * `retry_after` - Raw `Retry-After` header value, if the server sent one
    #[instrument(skip(self), fields(max_attempts = self.max_attempts))]
    pub fn should_retry(
        &self,
        failure_type: FailureType,
        attempt: u32,
        retry_after: Option<&str>,
    ) -> RetryDecision {
        match failure_type {
            FailureType::Permanent => {
                return RetryDecision::DoNotRetry {
                    reason: "permanent failure - retry would not help".to_string(),
                };
            }
            FailureType::NeedsAuth => {
                return RetryDecision::DoNotRetry {
                    reason: "authentication required - retry without a new token would not help"
                        .to_string(),
                };
            }
            FailureType::RateLimited => {}
        }

        if attempt >= self.max_attempts {
            debug!(attempt, max = self.max_attempts, "max attempts reached");
            return RetryDecision::DoNotRetry {
                reason: format!("max attempts ({}) exhausted", self.max_attempts),
            };
        }

        let (wait, source) = match retry_after.and_then(parse_retry_after) {
            Some(server_wait) => (self.clamp_server_wait(server_wait), WaitSource::RetryAfter),
            None => (self.backoff_wait(attempt), WaitSource::Backoff),
        };
        let delay = wait + self.safety_margin;

        debug!(
            attempt,
            next_attempt = attempt + 1,
            delay_ms = delay.as_millis(),
            ?source,
            "will retry"
        );

        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
            source,
        }
    }

    /// Computes `min(2^attempt seconds, max_wait)`, without the margin.
    #[must_use]
    pub fn backoff_wait(&self, attempt: u32) -> Duration {
        let seconds = BACKOFF_BASE.checked_pow(attempt).unwrap_or(u64::MAX);
        Duration::from_secs(seconds).min(self.max_wait)
    }

    /// Clamps a server-provided wait into `[1s, max_wait]`.
    #[must_use]
    pub fn clamp_server_wait(&self, wait: Duration) -> Duration {
        wait.clamp(MIN_SERVER_WAIT, self.max_wait)
    }
}

/// Classifies an optional HTTP status into a failure type.
///
/// Requests that never got a status (connection refused, DNS, decode errors)
/// are permanent for the purpose of pagination.
#[must_use]
pub fn classify_status(status: Option<u16>) -> FailureType {
    match status {
        Some(429) => FailureType::RateLimited,
        Some(401 | 403) => FailureType::NeedsAuth,
        _ => FailureType::Permanent,
    }
}

/// Parses a Retry-After header value into a Duration.
///
/// Supports two formats as per RFC 7231:
/// - Integer seconds: `Retry-After: 120`
/// - HTTP-date: `Retry-After: Wed, 21 Oct 2025 07:28:00 GMT`
///
/// Negative seconds and dates in the past yield zero. Returns `None` when the
/// value cannot be parsed. No upper cap is applied here.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use festival_sync_core::paging::parse_retry_after;
///
/// assert_eq!(parse_retry_after("120"), Some(Duration::from_secs(120)));
/// assert_eq!(parse_retry_after("0"), Some(Duration::ZERO));
/// assert_eq!(parse_retry_after("invalid"), None);
/// ```
#[must_use]
#[instrument]
pub fn parse_retry_after(header_value: &str) -> Option<Duration> {
    let header_value = header_value.trim();

    if let Ok(seconds) = header_value.parse::<i64>() {
        if seconds < 0 {
            debug!(seconds, "negative Retry-After value, treating as zero");
            return Some(Duration::ZERO);
        }
        #[allow(clippy::cast_sign_loss)]
        let duration = Duration::from_secs(seconds as u64);
        return Some(duration);
    }

    // Delta-seconds too large for i64 still count as a server hint.
    if !header_value.is_empty() && header_value.bytes().all(|b| b.is_ascii_digit()) {
        debug!(header_value, "oversized Retry-After value, saturating");
        return Some(Duration::from_secs(u64::MAX));
    }

    if let Ok(datetime) = httpdate::parse_http_date(header_value) {
        let now = std::time::SystemTime::now();
        if let Ok(duration) = datetime.duration_since(now) {
            Some(duration)
        } else {
            debug!(header_value, "Retry-After date is in the past, returning zero");
            Some(Duration::ZERO)
        }
    } else {
        debug!(header_value, "unparseable Retry-After value");
        None
    }
}
