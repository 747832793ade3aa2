//! [`PageFetcher`] adapters over the paged Spotify endpoints.

use async_trait::async_trait;

use crate::paging::{Page, PageFetcher};

use super::models::{PlaylistItem, SimplifiedPlaylist};
use super::{SpotifyClient, SpotifyError};

/// Pages through a user's playlists.
#[derive(Debug)]
pub struct UserPlaylistsPager<'a> {
    client: &'a SpotifyClient,
    user_id: String,
}

impl<'a> UserPlaylistsPager<'a> {
    #[must_use]
    pub fn new(client: &'a SpotifyClient, user_id: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl<'a> PageFetcher<SimplifiedPlaylist> for UserPlaylistsPager<'a> {
    type Error = SpotifyError;

    async fn fetch_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Page<SimplifiedPlaylist>, SpotifyError> {
        self.client
            .user_playlists_page(&self.user_id, offset, limit)
            .await
    }
}

/// Pages through the items of one playlist.
#[derive(Debug)]
pub struct PlaylistTracksPager<'a> {
    client: &'a SpotifyClient,
    playlist_id: String,
}

impl<'a> PlaylistTracksPager<'a> {
    #[must_use]
    pub fn new(client: &'a SpotifyClient, playlist_id: impl Into<String>) -> Self {
        Self {
            client,
            playlist_id: playlist_id.into(),
        }
    }

    #[must_use]
    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }
}

#[async_trait]
impl<'a> PageFetcher<PlaylistItem> for PlaylistTracksPager<'a> {
    type Error = SpotifyError;

    async fn fetch_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Page<PlaylistItem>, SpotifyError> {
        self.client
            .playlist_tracks_page(&self.playlist_id, offset, limit)
            .await
    }
}
