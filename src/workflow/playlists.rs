//! Playlist listing, comparison against the lineup, and playlist creation.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::paging::fetch_all_pages;
use crate::spotify::{PlaylistItem, PlaylistTracksPager, SpotifyClient, UserPlaylistsPager};

use super::{CreatedPlaylist, FoundArtist, PlaylistSummary, SyncError};

/// Top tracks taken from each artist.
pub const TRACKS_PER_ARTIST: usize = 2;

/// Track collection stops once this many URIs are gathered.
pub const MAX_PLAYLIST_TRACKS: usize = 100;

/// Market used when the user profile has no country.
pub const FALLBACK_MARKET: &str = "US";

const ARTIST_PAUSE: Duration = Duration::from_millis(50);

/// Lists every playlist of the current user.
///
/// # Errors
///
/// Spotify failures are mapped through [`SyncError::from_spotify`].
#[instrument(skip(client))]
pub async fn list_playlists(
    client: &SpotifyClient,
    max_retries: u32,
) -> Result<Vec<PlaylistSummary>, SyncError> {
    let user = client
        .current_user()
        .await
        .map_err(SyncError::from_spotify)?;
    debug!(user_id = %user.id, "Fetching user playlists");

    let pager = UserPlaylistsPager::new(client, user.id);
    let playlists = fetch_all_pages(&pager, max_retries)
        .await
        .map_err(SyncError::from_spotify)?;
    info!(count = playlists.len(), "Fetched user playlists");

    Ok(playlists.into_iter().map(PlaylistSummary::from).collect())
}

/// Festival artists that appear in at least one of the given playlists.
///
/// Playlists are fetched one after another. A playlist that cannot be read
/// is logged and skipped, except for a 401 which aborts the comparison.
///
/// # Errors
///
/// [`SyncError::InvalidInput`] when either list is empty,
/// [`SyncError::TokenExpired`] on a 401.
#[instrument(
    skip(client, festival_artists),
    fields(artists = festival_artists.len(), playlists = playlist_ids.len())
)]
pub async fn compare_selected_playlists(
    client: &SpotifyClient,
    festival_artists: &[FoundArtist],
    playlist_ids: &[String],
    max_retries: u32,
) -> Result<Vec<FoundArtist>, SyncError> {
    if festival_artists.is_empty() {
        return Err(SyncError::invalid_input("no festival artists provided"));
    }
    if playlist_ids.is_empty() {
        return Err(SyncError::invalid_input("no playlist ids provided"));
    }

    let mut playlist_artist_ids = HashSet::new();
    for playlist_id in playlist_ids {
        let pager = PlaylistTracksPager::new(client, playlist_id.as_str());
        match fetch_all_pages(&pager, max_retries).await {
            Ok(items) => {
                debug!(%playlist_id, tracks = items.len(), "Fetched playlist tracks");
                playlist_artist_ids.extend(collect_artist_ids(&items));
            }
            Err(e) if e.is_unauthorized() => {
                return Err(SyncError::from_spotify_auth_only(e));
            }
            Err(e) => warn!(%playlist_id, error = %e, "Cannot read playlist, skipping"),
        }
    }

    let matched = intersect_artists(festival_artists, &playlist_artist_ids);
    info!(
        playlist_artists = playlist_artist_ids.len(),
        matched = matched.len(),
        "Comparison complete"
    );
    Ok(matched)
}

/// Artist ids credited on any track; null tracks and id-less artists are ignored.
#[must_use]
pub fn collect_artist_ids(items: &[PlaylistItem]) -> HashSet<String> {
    items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .flat_map(|track| track.artists.iter())
        .filter_map(|artist| artist.id.clone())
        .collect()
}

/// Festival artists whose id is in `playlist_artist_ids`, in festival order.
#[must_use]
pub fn intersect_artists(
    festival_artists: &[FoundArtist],
    playlist_artist_ids: &HashSet<String>,
) -> Vec<FoundArtist> {
    festival_artists
        .iter()
        .filter(|artist| playlist_artist_ids.contains(&artist.id))
        .cloned()
        .collect()
}

/// Default playlist name for a given day.
#[must_use]
pub fn default_playlist_name(today: NaiveDate) -> String {
    format!("Festival Sync Matches ({})", today.format("%Y-%m-%d"))
}

fn playlist_description(today: NaiveDate) -> String {
    format!(
        "Artists from your festival sync results ({})",
        today.format("%Y-%m-%d")
    )
}

/// Creates a public playlist seeded with each artist's top tracks.
///
/// # Errors
///
/// [`SyncError::InvalidInput`] for an empty artist list; Spotify failures on
/// the profile, create or add requests are mapped through
/// [`SyncError::from_spotify`]. A 401 while collecting top tracks also aborts.
#[instrument(skip(client, artists), fields(artists = artists.len()))]
pub async fn create_playlist(
    client: &SpotifyClient,
    artists: &[FoundArtist],
    name: Option<&str>,
    today: NaiveDate,
) -> Result<CreatedPlaylist, SyncError> {
    if artists.is_empty() {
        return Err(SyncError::invalid_input(
            "no artists provided to create playlist",
        ));
    }

    let user = client
        .current_user()
        .await
        .map_err(SyncError::from_spotify)?;
    let market = user
        .country
        .filter(|country| !country.is_empty())
        .unwrap_or_else(|| FALLBACK_MARKET.to_string());

    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| default_playlist_name(today), String::from);
    info!(%name, user_id = %user.id, "Creating playlist");

    let playlist = client
        .create_playlist(&user.id, &name, &playlist_description(today), true)
        .await
        .map_err(SyncError::from_spotify)?;

    let uris = collect_top_track_uris(client, artists, &market).await?;
    if uris.is_empty() {
        info!("No track URIs found to add");
    } else {
        client
            .add_tracks_to_playlist(&playlist.id, &uris)
            .await
            .map_err(SyncError::from_spotify)?;
        info!(tracks = uris.len(), "Tracks added to playlist");
    }

    Ok(CreatedPlaylist {
        id: playlist.id,
        name: playlist.name,
        url: playlist.external_urls.spotify,
        track_count: uris.len(),
    })
}

async fn collect_top_track_uris(
    client: &SpotifyClient,
    artists: &[FoundArtist],
    market: &str,
) -> Result<Vec<String>, SyncError> {
    let mut uris: Vec<String> = Vec::new();
    for (index, artist) in artists.iter().enumerate() {
        if uris.len() >= MAX_PLAYLIST_TRACKS {
            debug!("Reached track limit, stopping collection");
            break;
        }
        if index > 0 {
            tokio::time::sleep(ARTIST_PAUSE).await;
        }
        match client.artist_top_tracks(&artist.id, market).await {
            Ok(tracks) => {
                let before = uris.len();
                uris.extend(
                    tracks
                        .into_iter()
                        .take(TRACKS_PER_ARTIST)
                        .map(|track| track.uri)
                        .filter(|uri| !uri.is_empty()),
                );
                debug!(artist = %artist.name, added = uris.len() - before, "Collected top tracks");
            }
            Err(e) if e.is_unauthorized() => return Err(SyncError::from_spotify(e)),
            Err(e) => warn!(artist = %artist.name, error = %e, "Top tracks failed, skipping"),
        }
    }
    Ok(dedup_in_order(uris))
}

fn dedup_in_order(uris: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    uris.into_iter()
        .filter(|uri| seen.insert(uri.clone()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::spotify::{SimplifiedArtist, Track};

    fn artist(id: &str, name: &str) -> FoundArtist {
        FoundArtist {
            search_query: name.to_string(),
            id: id.to_string(),
            name: name.to_string(),
            uri: format!("spotify:artist:{id}"),
        }
    }

    fn item(artist_ids: &[Option<&str>]) -> PlaylistItem {
        PlaylistItem {
            track: Some(Track {
                id: Some("t".to_string()),
                name: None,
                uri: "spotify:track:t".to_string(),
                artists: artist_ids
                    .iter()
                    .map(|id| SimplifiedArtist {
                        id: id.map(String::from),
                        name: "x".to_string(),
                    })
                    .collect(),
            }),
        }
    }

    // ==================== Intersection Tests ====================

    #[test]
    fn test_intersect_keeps_festival_order() {
        let festival = [artist("a", "A"), artist("b", "B"), artist("c", "C")];
        let ids: HashSet<String> = ["c", "a"].into_iter().map(String::from).collect();
        let matched = intersect_artists(&festival, &ids);
        let names: Vec<&str> = matched.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_intersect_no_overlap() {
        let festival = [artist("a", "A")];
        assert!(intersect_artists(&festival, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_collect_artist_ids_skips_null_tracks_and_local_artists() {
        let items = [
            item(&[Some("a"), Some("b")]),
            PlaylistItem { track: None },
            item(&[None, Some("a")]),
        ];
        let ids = collect_artist_ids(&items);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("a") && ids.contains("b"));
    }

    // ==================== Naming Tests ====================

    #[test]
    fn test_default_playlist_name() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
        assert_eq!(
            default_playlist_name(today),
            "Festival Sync Matches (2026-06-21)"
        );
        assert_eq!(
            playlist_description(today),
            "Artists from your festival sync results (2026-06-21)"
        );
    }

    #[test]
    fn test_dedup_in_order() {
        let uris = ["x", "y", "x", "z", "y"].map(String::from).to_vec();
        assert_eq!(dedup_in_order(uris), ["x", "y", "z"]);
    }

    // ==================== Validation Tests ====================

    #[tokio::test]
    async fn test_compare_rejects_empty_inputs() {
        let client = SpotifyClient::with_base_url("token", "http://127.0.0.1:9").unwrap();
        let err = compare_selected_playlists(&client, &[], &["p".to_string()], 3)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput { .. }));

        let err = compare_selected_playlists(&client, &[artist("a", "A")], &[], 3)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_create_playlist_rejects_empty_artists() {
        let client = SpotifyClient::with_base_url("token", "http://127.0.0.1:9").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
        let err = create_playlist(&client, &[], None, today).await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput { .. }));
    }
}
