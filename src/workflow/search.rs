//! Artist lookups: bulk resolution, alternatives and autocomplete.

use tracing::{debug, info, instrument, warn};

use crate::spotify::SpotifyClient;

use super::{ArtistAlternative, ArtistSuggestion, FoundArtist, SyncError};

/// Results requested per alternatives or autocomplete search.
pub const SUGGESTION_LIMIT: u32 = 5;

/// Shortest trimmed query that triggers an autocomplete search.
pub const MIN_AUTOCOMPLETE_LEN: usize = 2;

/// Resolves each name to its best Spotify match, in input order.
///
/// Names without a match are left out. A failed search for one name is
/// logged and skipped.
///
/// # Errors
///
/// [`SyncError::InvalidInput`] for an empty list, [`SyncError::TokenExpired`]
/// as soon as any search answers 401.
pub async fn find_artists(
    client: &SpotifyClient,
    names: &[String],
) -> Result<Vec<FoundArtist>, SyncError> {
    find_artists_with_progress(client, names, |_, _| {}).await
}

/// Same as [`find_artists`], calling `on_progress(done, name)` after each name.
///
/// # Errors
///
/// Same as [`find_artists`].
#[instrument(skip_all, fields(names = names.len()))]
pub async fn find_artists_with_progress<F>(
    client: &SpotifyClient,
    names: &[String],
    mut on_progress: F,
) -> Result<Vec<FoundArtist>, SyncError>
where
    F: FnMut(usize, &str),
{
    if names.is_empty() {
        return Err(SyncError::invalid_input("no artist names provided"));
    }

    info!(count = names.len(), "Searching artists on Spotify");
    let mut found = Vec::new();
    for (index, name) in names.iter().enumerate() {
        match client.search_artists(name, 1).await {
            Ok(artists) => match artists.into_iter().next() {
                Some(artist) => {
                    debug!(query = %name, artist = %artist.name, id = %artist.id, "Artist found");
                    found.push(FoundArtist::from_search(name, artist));
                }
                None => debug!(query = %name, "Artist not found"),
            },
            Err(e) if e.is_unauthorized() => {
                return Err(SyncError::from_spotify_auth_only(e));
            }
            Err(e) => warn!(query = %name, error = %e, "Artist search failed, skipping"),
        }
        on_progress(index + 1, name);
    }

    info!(found = found.len(), "Artist search finished");
    Ok(found)
}

/// Up to five candidate artists for a name the user wants to correct.
///
/// # Errors
///
/// [`SyncError::InvalidInput`] for a blank name; Spotify failures are mapped
/// through [`SyncError::from_spotify`].
#[instrument(skip(client))]
pub async fn artist_alternatives(
    client: &SpotifyClient,
    name: &str,
) -> Result<Vec<ArtistAlternative>, SyncError> {
    if name.trim().is_empty() {
        return Err(SyncError::invalid_input(
            "artist name must be a non-empty string",
        ));
    }
    let artists = client
        .search_artists(name, SUGGESTION_LIMIT)
        .await
        .map_err(SyncError::from_spotify)?;
    debug!(count = artists.len(), "Alternatives found");
    Ok(artists.into_iter().map(ArtistAlternative::from).collect())
}

/// Up to five suggestions for a partially typed name.
///
/// Queries shorter than two characters after trimming return an empty list
/// without calling Spotify.
///
/// # Errors
///
/// Spotify failures are mapped through [`SyncError::from_spotify`].
#[instrument(skip(client))]
pub async fn autocomplete_artists(
    client: &SpotifyClient,
    query: &str,
) -> Result<Vec<ArtistSuggestion>, SyncError> {
    let query = query.trim();
    if query.chars().count() < MIN_AUTOCOMPLETE_LEN {
        return Ok(Vec::new());
    }
    let artists = client
        .search_artists(query, SUGGESTION_LIMIT)
        .await
        .map_err(SyncError::from_spotify)?;
    Ok(artists.into_iter().map(ArtistSuggestion::from).collect())
}
