//! Per-session Spotify Web API client.

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::http_client::{HttpTimeouts, build_http_client};
use crate::paging::Page;

use super::SpotifyError;
use super::models::{
    Artist, ErrorEnvelope, Playlist, PlaylistItem, SearchResponse, SimplifiedPlaylist,
    SnapshotResponse, TopTracksResponse, Track, UserProfile,
};

/// Default Spotify Web API base URL.
pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com";

/// Maximum URIs accepted by one add-items request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Spotify Web API client bound to one access token.
///
/// Construct one per session and pass it by reference; there is no shared
/// global instance.
pub struct SpotifyClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Creates a client against the public Spotify API.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Config`] if the token is empty or the HTTP
    /// client cannot be built.
    #[instrument(skip_all)]
    pub fn new(access_token: impl Into<String>) -> Result<Self, SpotifyError> {
        Self::with_options(access_token, DEFAULT_SPOTIFY_API_BASE, HttpTimeouts::default())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::new`], plus an unparseable base URL.
    #[instrument(skip_all, fields(base_url))]
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SpotifyError> {
        Self::with_options(access_token, base_url, HttpTimeouts::default())
    }

    /// Creates a client with an explicit base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::with_base_url`].
    pub fn with_options(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, SpotifyError> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(SpotifyError::config("access token is empty"));
        }
        if access_token.chars().any(char::is_control) {
            return Err(SpotifyError::config(
                "access token contains control characters",
            ));
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| SpotifyError::config(format!("invalid base URL '{base_url}': {e}")))?;

        let client = build_http_client(timeouts)
            .map_err(|e| SpotifyError::config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ==================== Endpoints ====================

    /// `GET /v1/me`.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError`] on transport, status or decode failure.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile, SpotifyError> {
        self.get_json("/v1/me", &[]).await
    }

    /// One page of a user's playlists.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError`] on transport, status or decode failure.
    #[instrument(skip(self))]
    pub async fn user_playlists_page(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SimplifiedPlaylist>, SpotifyError> {
        let path = format!("/v1/users/{}/playlists", urlencoding::encode(user_id));
        self.get_json(&path, &paging_query(offset, limit)).await
    }

    /// One page of a playlist's items.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError`] on transport, status or decode failure.
    #[instrument(skip(self))]
    pub async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<PlaylistItem>, SpotifyError> {
        let path = format!("/v1/playlists/{}/tracks", urlencoding::encode(playlist_id));
        self.get_json(&path, &paging_query(offset, limit)).await
    }

    /// Searches artists by name, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError`] on transport, status or decode failure.
    #[instrument(skip(self))]
    pub async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, SpotifyError> {
        let query = [
            ("q", query.to_string()),
            ("type", "artist".to_string()),
            ("limit", limit.to_string()),
        ];
        let response: SearchResponse = self.get_json("/v1/search", &query).await?;
        let artists = response
            .artists
            .and_then(|page| page.items)
            .unwrap_or_default();
        debug!(found = artists.len(), "Artist search completed");
        Ok(artists)
    }

    /// An artist's top tracks in `market`.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError`] on transport, status or decode failure.
    #[instrument(skip(self))]
    pub async fn artist_top_tracks(
        &self,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Track>, SpotifyError> {
        let path = format!("/v1/artists/{}/top-tracks", urlencoding::encode(artist_id));
        let response: TopTracksResponse = self
            .get_json(&path, &[("market", market.to_string())])
            .await?;
        Ok(response.tracks)
    }

    /// Creates a playlist owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError`] on transport, status or decode failure.
    #[instrument(skip(self, description))]
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist, SpotifyError> {
        let path = format!("/v1/users/{}/playlists", urlencoding::encode(user_id));
        let body = json!({
            "name": name,
            "description": description,
            "public": public,
        });
        self.post_json(&path, &body).await
    }

    /// Appends `uris` to a playlist, at most 100 per request.
    ///
    /// Returns the number of URIs sent.
    ///
    /// # Errors
    ///
    /// Returns the first failing request's [`SpotifyError`]; earlier chunks stay added.
    #[instrument(skip(self, uris), fields(uri_count = uris.len()))]
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<usize, SpotifyError> {
        let path = format!("/v1/playlists/{}/tracks", urlencoding::encode(playlist_id));
        for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
            let _: SnapshotResponse = self.post_json(&path, &json!({ "uris": chunk })).await?;
            debug!(added = chunk.len(), "Added tracks to playlist");
        }
        Ok(uris.len())
    }

    // ==================== Transport ====================

    fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, SpotifyError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| SpotifyError::config(format!("invalid endpoint URL for {path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SpotifyError> {
        let url = self.endpoint_url(path, query)?;
        debug!(api_url = %url, "Calling Spotify API");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| SpotifyError::network(path, e))?;
        decode_response(path, response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, SpotifyError> {
        let url = self.endpoint_url(path, &[])?;
        debug!(api_url = %url, "Calling Spotify API");
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| SpotifyError::network(path, e))?;
        decode_response(path, response).await
    }
}

impl std::fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn paging_query(offset: u32, limit: u32) -> [(&'static str, String); 2] {
    [("offset", offset.to_string()), ("limit", limit.to_string())]
}

async fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, SpotifyError> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    let body = response
        .text()
        .await
        .map_err(|e| SpotifyError::network(endpoint, e))?;

    if !status.is_success() {
        let message = api_error_message(&body);
        if status.as_u16() == 429 {
            debug!(endpoint, retry_after = ?retry_after, "Spotify rate limit hit");
        } else {
            warn!(endpoint, status = status.as_u16(), message = ?message, "Spotify API error");
        }
        return Err(SpotifyError::http_status(
            endpoint,
            status.as_u16(),
            retry_after,
            message,
        ));
    }

    serde_json::from_str(&body).map_err(|e| SpotifyError::decode(endpoint, e))
}

/// Extracts `error.message` from a Spotify error body.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_token() {
        let err = SpotifyClient::new("   ").unwrap_err();
        assert!(matches!(err, SpotifyError::Config { .. }));
    }

    #[test]
    fn test_new_rejects_control_characters() {
        let err = SpotifyClient::new("abc\ndef").unwrap_err();
        assert!(err.to_string().contains("control characters"));
    }

    #[test]
    fn test_with_base_url_rejects_invalid_url() {
        let err = SpotifyClient::with_base_url("token", "not a url").unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = SpotifyClient::with_base_url("token", "http://localhost:9/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9");
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        let client = SpotifyClient::with_base_url("token", "http://localhost:9").unwrap();
        let url = client
            .endpoint_url(
                "/v1/search",
                &[("q", "Sigur Rós & Friends".to_string()), ("type", "artist".to_string())],
            )
            .unwrap();
        assert_eq!(url.path(), "/v1/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("q".to_string(), "Sigur Rós & Friends".to_string()),
                ("type".to_string(), "artist".to_string())
            ]
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = SpotifyClient::new("secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("api.spotify.com"));
    }

    #[test]
    fn test_api_error_message_parsed() {
        assert_eq!(
            api_error_message(r#"{"error":{"status":403,"message":"Insufficient client scope"}}"#),
            Some("Insufficient client scope".to_string())
        );
    }

    #[test]
    fn test_api_error_message_non_json_body() {
        assert_eq!(api_error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(api_error_message(r#"{"error":{"status":500,"message":""}}"#), None);
    }
}
