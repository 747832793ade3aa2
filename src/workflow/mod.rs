//! End-to-end sync operations built on the Spotify client and the pager.
//!
//! Each function takes the per-session [`SpotifyClient`](crate::spotify::SpotifyClient)
//! by reference and runs its requests sequentially.

mod error;
mod playlists;
mod search;
mod types;

pub use error::SyncError;
pub use playlists::{
    FALLBACK_MARKET, MAX_PLAYLIST_TRACKS, TRACKS_PER_ARTIST, collect_artist_ids,
    compare_selected_playlists, create_playlist, default_playlist_name, intersect_artists,
    list_playlists,
};
pub use search::{
    MIN_AUTOCOMPLETE_LEN, SUGGESTION_LIMIT, artist_alternatives, autocomplete_artists,
    find_artists, find_artists_with_progress,
};
pub use types::{ArtistAlternative, ArtistSuggestion, CreatedPlaylist, FoundArtist, PlaylistSummary};
