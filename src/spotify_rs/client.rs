use std::time::Duration;

use color_eyre::eyre::eyre;
use reqwest::{RequestBuilder, Response};
use url::Url;

use crate::ports::spotify::{Result, SpotifyApiError};
use crate::spotify_rs::types::{
    AddTracksRequest, CreatePlaylistRequest, SpotifyPlaylistRef, SpotifySearchResponse,
    track_search_query, track_uri,
};

pub const SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1/";

/// Results requested per search. Only this first page is ever consulted.
pub const SEARCH_LIMIT: u32 = 20;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Spotify Web API client acting on behalf of a single user
pub struct SpotifyClient {
    access_token: String,
    user_id: String,
    base_url: Url,
    client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(access_token: String, user_id: String, base_url: Url) -> color_eyre::Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(eyre!("Spotify API base URL `{}` cannot hold a path", base_url));
        }

        Ok(Self {
            access_token,
            user_id,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends an authenticated request and turns non-2xx statuses into `Rejected`.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.access_token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(SpotifyApiError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpotifyApiError::Rejected {
                status,
                reason: response
                    .text()
                    .await
                    .unwrap_or("Failed to get error text".to_string()),
            });
        }

        Ok(response)
    }

    /// Search the catalog for a track by a given artist
    /// https://developer.spotify.com/documentation/web-api/reference/search
    pub async fn search_track_ids(&self, track: &str, artist: &str) -> Result<Vec<String>> {
        let query = track_search_query(track, artist);
        let limit = SEARCH_LIMIT.to_string();
        log::debug!("Searching Spotify for `{}`", query);

        let request = self.client.get(self.endpoint(&["search"])).query(&[
            ("q", query.as_str()),
            ("type", "track"),
            ("limit", limit.as_str()),
        ]);

        let response: SpotifySearchResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(SpotifyApiError::InvalidResponse)?;

        Ok(response.track_ids())
    }

    /// Check which of the tracks are in the user's saved tracks
    /// https://developer.spotify.com/documentation/web-api/reference/check-users-saved-tracks
    pub async fn contains_saved_tracks(&self, track_ids: &[String]) -> Result<Vec<bool>> {
        log::debug!("Checking {} tracks against saved tracks", track_ids.len());

        let request = self
            .client
            .get(self.endpoint(&["me", "tracks", "contains"]))
            .query(&[("ids", track_ids.join(","))]);

        self.send(request)
            .await?
            .json()
            .await
            .map_err(SpotifyApiError::InvalidResponse)
    }

    /// Create a playlist owned by the configured user
    /// https://developer.spotify.com/documentation/web-api/reference/create-playlist
    pub async fn create_playlist(&self, name: &str) -> Result<String> {
        log::debug!("Creating playlist `{}` for user {}", name, self.user_id);

        let request = self
            .client
            .post(self.endpoint(&["users", self.user_id.as_str(), "playlists"]))
            .json(&CreatePlaylistRequest { name });

        let playlist: SpotifyPlaylistRef = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(SpotifyApiError::InvalidResponse)?;

        Ok(playlist.id)
    }

    /// Add tracks to a playlist. Spotify accepts at most 100 per request.
    /// https://developer.spotify.com/documentation/web-api/reference/add-tracks-to-playlist
    pub async fn add_tracks_to_playlist(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        log::debug!("Adding {} tracks to playlist {}", track_ids.len(), playlist_id);

        let body = AddTracksRequest {
            uris: track_ids.iter().map(|id| track_uri(id)).collect(),
        };
        let request = self
            .client
            .post(self.endpoint(&["playlists", playlist_id, "tracks"]))
            .json(&body);

        self.send(request).await?;
        Ok(())
    }
}
