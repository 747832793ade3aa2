//! Error type for the sync workflow operations.

use thiserror::Error;

use crate::spotify::SpotifyError;

/// Errors surfaced by the workflow operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Caller-supplied input was rejected before any request was made.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Spotify answered 401: the access token expired or was revoked.
    #[error("Spotify token expired or invalid")]
    TokenExpired {
        #[source]
        source: SpotifyError,
    },

    /// Spotify answered 403: the token lacks a required scope.
    #[error("missing permissions (scope) to create or modify playlists")]
    MissingScope {
        #[source]
        source: SpotifyError,
    },

    /// Any other Spotify failure.
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

impl SyncError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Maps 401 to [`SyncError::TokenExpired`] and 403 to [`SyncError::MissingScope`].
    #[must_use]
    pub fn from_spotify(source: SpotifyError) -> Self {
        if source.is_unauthorized() {
            Self::TokenExpired { source }
        } else if source.is_forbidden() {
            Self::MissingScope { source }
        } else {
            Self::Spotify(source)
        }
    }

    /// Maps only 401 to [`SyncError::TokenExpired`].
    #[must_use]
    pub(crate) fn from_spotify_auth_only(source: SpotifyError) -> Self {
        if source.is_unauthorized() {
            Self::TokenExpired { source }
        } else {
            Self::Spotify(source)
        }
    }
}
