use reqwest::StatusCode;

/// Failure of a single Spotify API call.
///
/// Any of these aborts the playlist conversion in progress; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum SpotifyApiError {
    #[error("Could not reach the Spotify API: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("Spotify API rejected the request ({status}): {reason}")]
    Rejected { status: StatusCode, reason: String },
    #[error("Failed to parse Spotify API response: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

pub type Result<T, E = SpotifyApiError> = std::result::Result<T, E>;

/// Port trait wrapping the Spotify API capabilities used by the converter.
///
/// Implementations live in `services::spotify::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifyClient: Send + Sync {
    /// Track ids for `"<track> artist:<artist>"`, in Spotify's ranking order (first page only).
    async fn search_tracks(&self, track: &str, artist: &str) -> Result<Vec<String>>;

    /// One flag per id, aligned with `track_ids`, telling whether the user saved that track.
    async fn contains_saved_tracks(&self, track_ids: &[String]) -> Result<Vec<bool>>;

    /// Creates a playlist owned by the configured user and returns its id.
    async fn create_playlist(&self, name: &str) -> Result<String>;

    /// Appends at most 100 tracks to the playlist.
    async fn add_tracks_to_playlist(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}
