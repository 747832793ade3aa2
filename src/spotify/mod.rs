//! Spotify Web API client.
//!
//! [`SpotifyClient`] wraps the handful of endpoints the sync workflow needs.
//! Paged endpoints are exposed both page-by-page and through the
//! [`UserPlaylistsPager`] / [`PlaylistTracksPager`] adapters, which plug into
//! [`crate::paging::fetch_all_pages`].
//!
//! Every non-2xx response becomes [`SpotifyError::HttpStatus`] carrying the
//! status, the raw `Retry-After` header and the API's error message, so the
//! pagination helper can decide whether to back off.

mod client;
mod error;
mod models;
mod pagers;

pub use client::{DEFAULT_SPOTIFY_API_BASE, MAX_TRACKS_PER_REQUEST, SpotifyClient};
pub use error::SpotifyError;
pub use models::{
    Artist, ExternalUrls, Image, Playlist, PlaylistItem, PlaylistOwner, SimplifiedArtist,
    SimplifiedPlaylist, Track, TracksRef, UserProfile,
};
pub use pagers::{PlaylistTracksPager, UserPlaylistsPager};
