//! Spotify Web API response shapes.
//!
//! Only the fields this crate consumes are modeled; everything else in the
//! responses is ignored by serde.

use serde::{Deserialize, Serialize};

use crate::paging::Page;

/// `GET /v1/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    /// ISO 3166-1 alpha-2 country; only present with the `user-read-private` scope.
    pub country: Option<String>,
}

/// Owner of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

/// Track count reference embedded in a simplified playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracksRef {
    #[serde(default)]
    pub total: u32,
}

/// Playlist as listed in a user's playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
    #[serde(default)]
    pub tracks: TracksRef,
}

/// One entry of a playlist. `track` is null for removed or unavailable items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

/// A track with its credited artists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

/// Artist reference inside a track. Local files carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
}

/// Full artist object as returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Playlist returned by `POST /v1/users/{id}/playlists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

// ==================== Envelopes ====================

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub artists: Option<Page<Artist>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotResponse {
    #[allow(dead_code)] // Deserialized to validate the response shape
    pub snapshot_id: String,
}

/// `{"error": {"status": 401, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorObject {
    #[allow(dead_code)] // Mirrors the HTTP status already taken from the response
    pub status: Option<u16>,
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_simplified_playlist_deserialize() {
        let json = r#"{
            "id": "pl1",
            "name": "Summer",
            "owner": {"id": "alice", "display_name": "Alice"},
            "tracks": {"href": "https://api.spotify.com/v1/playlists/pl1/tracks", "total": 42},
            "public": true
        }"#;
        let playlist: SimplifiedPlaylist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.tracks.total, 42);
        assert_eq!(playlist.owner.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_simplified_playlist_without_tracks_ref() {
        let json = r#"{"id":"pl1","name":"x","owner":{"id":"bob","display_name":null}}"#;
        let playlist: SimplifiedPlaylist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.tracks.total, 0);
        assert!(playlist.owner.display_name.is_none());
    }

    #[test]
    fn test_playlist_item_with_null_track() {
        let item: PlaylistItem = serde_json::from_str(r#"{"track":null}"#).unwrap();
        assert!(item.track.is_none());
    }

    #[test]
    fn test_track_with_local_artist() {
        let json = r#"{"id":null,"name":"demo","uri":"spotify:local:::demo:1","artists":[{"id":null,"name":"Me"}]}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.artists[0].id.is_none());
    }

    #[test]
    fn test_search_response_deserialize() {
        let json = r#"{"artists":{"items":[{"id":"a1","name":"Bicep","uri":"spotify:artist:a1","images":[{"url":"https://i.scdn.co/x","height":640,"width":640}]}],"total":1}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let page = response.artists.unwrap();
        let artists = page.items.unwrap();
        assert_eq!(artists[0].name, "Bicep");
        assert_eq!(artists[0].images[0].height, Some(640));
    }

    #[test]
    fn test_error_envelope_deserialize() {
        let json = r#"{"error":{"status":401,"message":"The access token expired"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.error.message.as_deref(),
            Some("The access token expired")
        );
    }
}
