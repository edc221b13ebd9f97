use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::services::spotify::types::TrackQuery;

pub const PLAYLIST_FILE_EXTENSION: &str = "txt";

/// Prefix of the optional line that names the playlist, matched case-insensitively.
const NAME_PREFIX: &str = "name:";

#[derive(Debug, thiserror::Error)]
pub enum PlaylistFileError {
    #[error("\"{0}\" is not a directory.")]
    NotADirectory(PathBuf),

    #[error("\"{0}\" contains no textfiles")]
    NoTextFiles(PathBuf),

    #[error("Failed to list directory {path}: {source}")]
    FailedToListDirectory {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to read playlist file {path}: {source}")]
    FailedToRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Which field of a playlist line holds the track and which the artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrder {
    #[serde(rename = "track artist")]
    TrackArtist,
    #[serde(rename = "artist track")]
    ArtistTrack,
}

impl DataOrder {
    fn pick<'a>(self, first: &'a str, second: &'a str) -> (&'a str, &'a str) {
        match self {
            DataOrder::TrackArtist => (first, second),
            DataOrder::ArtistTrack => (second, first),
        }
    }
}

/// A text file listing one "track<delimiter>artist" pair per line.
#[derive(Debug, Clone)]
pub struct PlaylistFile {
    path: PathBuf,
    file_name: String,
    lines: Vec<String>,
}

impl PlaylistFile {
    pub fn read(path: &Path) -> Result<Self, PlaylistFileError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| PlaylistFileError::FailedToRead {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_contents(path, &contents))
    }

    fn from_contents(path: &Path, contents: &str) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            file_name,
            lines: contents.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the first `name:` line.
    fn name_line_index(&self) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.to_lowercase().starts_with(NAME_PREFIX))
    }

    /// The value of the first `name:` line, or the file name when there is none.
    pub fn playlist_name(&self) -> &str {
        let name_line = self.name_line_index().map(|index| self.lines[index].as_str());
        match name_line.and_then(|line| line.split_once(':')) {
            Some((_, name)) => name.trim(),
            None => &self.file_name,
        }
    }

    /// Every line with at least two `delimiter`-separated fields, in file order.
    ///
    /// Only the first two fields are used; the rest of the line is ignored.
    pub fn playlist_items(&self, delimiter: &str, order: DataOrder) -> Vec<TrackQuery> {
        let name_line = self.name_line_index();

        self.lines
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != name_line)
            .filter_map(|(_, line)| {
                let mut fields = line.split(delimiter);
                let first = fields.next()?.trim();
                let second = fields.next()?.trim();
                let (track, artist) = order.pick(first, second);
                Some(TrackQuery::new(track, artist))
            })
            .collect()
    }
}

/// Reads every `.txt` file directly inside `directory`, sorted by file name.
pub fn load_playlists(directory: &Path) -> Result<Vec<PlaylistFile>, PlaylistFileError> {
    if !directory.is_dir() {
        return Err(PlaylistFileError::NotADirectory(directory.to_path_buf()));
    }

    let mut playlists = Vec::new();
    for entry in walkdir::WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| PlaylistFileError::FailedToListDirectory {
            path: directory.to_path_buf(),
            source,
        })?;

        let is_text_file = entry.path().extension().and_then(|e| e.to_str())
            == Some(PLAYLIST_FILE_EXTENSION);
        if !entry.file_type().is_file() || !is_text_file {
            continue;
        }

        log::debug!("Reading playlist file: {}", entry.path().display());
        playlists.push(PlaylistFile::read(entry.path())?);
    }

    if playlists.is_empty() {
        return Err(PlaylistFileError::NoTextFiles(directory.to_path_buf()));
    }

    Ok(playlists)
}
