use crate::ports::spotify::{Result, SpotifyClient};
use crate::services::spotify::track_resolver::TrackResolver;
use crate::services::spotify::types::{ConversionOutcome, PlaylistDraft, TrackQuery};

/// Spotify rejects playlist additions with more items than this.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Creates Spotify playlists from parsed playlist files.
pub struct PlaylistPopulator<C: SpotifyClient> {
    client: C,
}

impl<C: SpotifyClient> PlaylistPopulator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn create_playlist(&self, name: &str) -> Result<String> {
        let playlist_id = self.client.create_playlist(name).await?;
        log::info!("Created playlist '{}' ({})", name, playlist_id);
        Ok(playlist_id)
    }

    /// Adds the tracks in order, one request per batch of at most
    /// `MAX_TRACKS_PER_REQUEST`. Stops at the first failed batch; batches already
    /// added stay in the playlist.
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        for (index, batch) in track_ids.chunks(MAX_TRACKS_PER_REQUEST).enumerate() {
            log::debug!(
                "Adding batch {} ({} tracks) to playlist {}",
                index + 1,
                batch.len(),
                playlist_id
            );
            self.client.add_tracks_to_playlist(playlist_id, batch).await?;
        }

        Ok(())
    }

    /// Resolves every query and, if anything matched, creates a playlist holding the matches.
    ///
    /// Every call creates a new playlist; existing playlists with the same name are left alone.
    pub async fn convert(&self, name: &str, queries: &[TrackQuery]) -> Result<ConversionOutcome> {
        log::info!("Converting playlist '{}' ({} tracks)", name, queries.len());

        let resolver = TrackResolver::new(&self.client);
        let mut resolutions = Vec::with_capacity(queries.len());
        let mut unresolved = Vec::new();

        for query in queries {
            let resolved = resolver.resolve(query).await?;
            if resolved.is_none() {
                unresolved.push(query.clone());
            }
            resolutions.push(resolved);
        }

        let draft = PlaylistDraft::from_resolutions(name, resolutions);
        if draft.is_empty() {
            log::info!("No tracks matched for '{}', skipping playlist creation", name);
            return Ok(ConversionOutcome::Skipped { unresolved });
        }

        let playlist_id = self.create_playlist(&draft.name).await?;
        self.add_tracks(&playlist_id, &draft.resolved_tracks).await?;

        Ok(ConversionOutcome::Created {
            playlist_id,
            tracks_added: draft.resolved_tracks.len(),
            unresolved,
        })
    }
}
