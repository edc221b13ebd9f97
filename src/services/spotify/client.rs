use crate::ports::spotify::{Result, SpotifyClient};
use crate::spotify_rs::client::SpotifyClient as SpotifyWebApi;

pub struct SpotifyHttpAdapter {
    api: SpotifyWebApi,
}

impl SpotifyHttpAdapter {
    pub fn new(api: SpotifyWebApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl SpotifyClient for SpotifyHttpAdapter {
    async fn search_tracks(&self, track: &str, artist: &str) -> Result<Vec<String>> {
        self.api.search_track_ids(track, artist).await
    }

    async fn contains_saved_tracks(&self, track_ids: &[String]) -> Result<Vec<bool>> {
        self.api.contains_saved_tracks(track_ids).await
    }

    async fn create_playlist(&self, name: &str) -> Result<String> {
        self.api.create_playlist(name).await
    }

    async fn add_tracks_to_playlist(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        self.api.add_tracks_to_playlist(playlist_id, track_ids).await
    }
}
