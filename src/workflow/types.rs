//! Values produced and consumed by the workflow operations.

use serde::{Deserialize, Serialize};

use crate::spotify::{Artist, Image, SimplifiedPlaylist};

/// A candidate name resolved to a Spotify artist.
///
/// `search_query` is empty when the artist was supplied directly rather
/// than found by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundArtist {
    #[serde(default)]
    pub search_query: String,
    pub id: String,
    pub name: String,
    pub uri: String,
}

impl FoundArtist {
    #[must_use]
    pub fn from_search(query: &str, artist: Artist) -> Self {
        Self {
            search_query: query.to_string(),
            id: artist.id,
            name: artist.name,
            uri: artist.uri,
        }
    }
}

/// One alternative match for a misrecognized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistAlternative {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub images: Vec<Image>,
}

impl From<Artist> for ArtistAlternative {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            uri: artist.uri,
            images: artist.images,
        }
    }
}

/// Autocomplete suggestion while typing an artist name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSuggestion {
    pub id: String,
    pub name: String,
    pub uri: String,
}

impl From<Artist> for ArtistSuggestion {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            uri: artist.uri,
        }
    }
}

/// A user playlist as offered for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    /// Owner display name, else owner id.
    pub owner: String,
    pub track_count: u32,
}

impl From<SimplifiedPlaylist> for PlaylistSummary {
    fn from(playlist: SimplifiedPlaylist) -> Self {
        let owner = playlist
            .owner
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or(playlist.owner.id);
        Self {
            id: playlist.id,
            name: playlist.name,
            owner,
            track_count: playlist.tracks.total,
        }
    }
}

/// Result of [`create_playlist`](super::create_playlist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    /// Web URL of the playlist, when Spotify returned one.
    pub url: Option<String>,
    pub track_count: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::spotify::{PlaylistOwner, TracksRef};

    fn playlist(display_name: Option<&str>) -> SimplifiedPlaylist {
        SimplifiedPlaylist {
            id: "pl1".to_string(),
            name: "Summer".to_string(),
            owner: PlaylistOwner {
                id: "alice".to_string(),
                display_name: display_name.map(String::from),
            },
            tracks: TracksRef { total: 12 },
        }
    }

    #[test]
    fn test_playlist_summary_prefers_display_name() {
        let summary = PlaylistSummary::from(playlist(Some("Alice")));
        assert_eq!(summary.owner, "Alice");
        assert_eq!(summary.track_count, 12);
    }

    #[test]
    fn test_playlist_summary_falls_back_to_owner_id() {
        assert_eq!(PlaylistSummary::from(playlist(None)).owner, "alice");
        assert_eq!(PlaylistSummary::from(playlist(Some(""))).owner, "alice");
    }

    #[test]
    fn test_found_artist_deserializes_without_search_query() {
        let artist: FoundArtist =
            serde_json::from_str(r#"{"id":"a1","name":"Bicep","uri":"spotify:artist:a1"}"#)
                .unwrap();
        assert!(artist.search_query.is_empty());
    }
}
