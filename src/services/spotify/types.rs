use std::fmt;

/// A (track, artist) pair read from a playlist file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub track: String,
    pub artist: String,
}

impl TrackQuery {
    pub fn new(track: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for TrackQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' by '{}'", self.track, self.artist)
    }
}

/// Tracks that will make up a new remote playlist, in playlist file order.
///
/// Duplicates are kept: a track listed twice in the file is added twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDraft {
    pub name: String,
    pub resolved_tracks: Vec<String>,
}

impl PlaylistDraft {
    /// Builds a draft from per-query resolutions, dropping the ones that found nothing.
    pub fn from_resolutions(
        name: impl Into<String>,
        resolutions: impl IntoIterator<Item = Option<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            resolved_tracks: resolutions.into_iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resolved_tracks.is_empty()
    }
}

/// Result of converting one playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// No query matched anything, so no playlist was created.
    Skipped { unresolved: Vec<TrackQuery> },
    Created {
        playlist_id: String,
        tracks_added: usize,
        unresolved: Vec<TrackQuery>,
    },
}

impl ConversionOutcome {
    pub fn unresolved(&self) -> &[TrackQuery] {
        match self {
            ConversionOutcome::Skipped { unresolved } => unresolved,
            ConversionOutcome::Created { unresolved, .. } => unresolved,
        }
    }
}
