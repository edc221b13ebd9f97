use crate::ports::spotify::{Result, SpotifyClient};
use crate::services::spotify::types::TrackQuery;

/// Returns the first candidate whose saved flag is set.
///
/// `candidates` and `saved_flags` are aligned by position. Extra entries in the
/// longer sequence are ignored.
pub fn first_saved<'a>(candidates: &'a [String], saved_flags: &[bool]) -> Option<&'a String> {
    candidates
        .iter()
        .zip(saved_flags)
        .find_map(|(candidate, saved)| saved.then_some(candidate))
}

/// Maps free-text track queries to Spotify track ids.
pub struct TrackResolver<'a, C: SpotifyClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: SpotifyClient + ?Sized> TrackResolver<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Candidate ids for the query, best match first.
    pub async fn search(&self, query: &TrackQuery) -> Result<Vec<String>> {
        self.client.search_tracks(&query.track, &query.artist).await
    }

    /// Asks Spotify about every candidate in one call and returns the first saved one.
    pub async fn find_saved_among_candidates(&self, candidates: &[String]) -> Result<Option<String>> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let saved_flags = self.client.contains_saved_tracks(candidates).await?;
        if saved_flags.len() != candidates.len() {
            log::warn!(
                "Saved tracks check returned {} flags for {} tracks",
                saved_flags.len(),
                candidates.len()
            );
        }

        Ok(first_saved(candidates, &saved_flags).cloned())
    }

    /// The first candidate the user already saved, otherwise the top search result.
    pub async fn resolve(&self, query: &TrackQuery) -> Result<Option<String>> {
        let candidates = self.search(query).await?;
        if candidates.is_empty() {
            log::info!("No Spotify match for {}", query);
            return Ok(None);
        }

        let saved = self.find_saved_among_candidates(&candidates).await?;
        let chosen = saved.or_else(|| candidates.into_iter().next());
        log::debug!("Resolved {} to {:?}", query, chosen);

        Ok(chosen)
    }
}
