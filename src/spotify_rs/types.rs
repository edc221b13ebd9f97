use serde::{Deserialize, Serialize};

/// `GET /search` response, only the fields the converter reads
///
/// Spotify sometimes returns `null` in place of a track it can no longer serve,
/// so both the item and its id are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: SpotifyPage<Option<SpotifyTrackRef>>,
}

impl SpotifySearchResponse {
    /// Ids of the playable results, in ranking order.
    pub fn track_ids(self) -> Vec<String> {
        self.tracks
            .items
            .into_iter()
            .flatten()
            .filter_map(|track| track.id)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPage<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrackRef {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
}

/// Spotify playlist as returned by playlist creation
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

/// `spotify:track:<id>`
pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

/// The search expression Spotify expects for a track filtered by artist.
pub fn track_search_query(track: &str, artist: &str) -> String {
    format!("{} artist:{}", track, artist)
}
