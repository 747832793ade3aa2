//! User-Agent string shared by the Spotify and Vision HTTP clients.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/festival-sync";

/// Default User-Agent for all outbound API requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("festival-sync/{version} (+{PROJECT_UA_URL})")
}
