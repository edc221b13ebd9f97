use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::playlist_file::DataOrder;
use crate::spotify_rs::client::SPOTIFY_API_BASE_URL;

const DEFAULT_CONFIG: &str = r#"[file_info]
# Directory holding the playlist .txt files
directory_path = "~/playlists"
# "track artist" or "artist track"
data_order = "track artist"
# Separates the track from the artist on each line
data_delimiter = " - "

[api]
# Spotify user id that will own the created playlists
user_id = ""
# Needs the playlist-modify-public, playlist-modify-private and user-library-read scopes
access_token = ""
"#;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    file_info: FileInfoConfig,
    api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfoConfig {
    pub directory_path: String,
    pub data_order: DataOrder,
    pub data_delimiter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub user_id: String,
    pub access_token: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn quote_each_word(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| format!("'{}'", word))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlist-converter").join("config.toml"))
    }

    /// Load config from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path().ok_or(eyre!("Config file not found"))?;

        Self::from_file(&config_path)
    }

    /// Write the commented template to the default path unless a config already exists
    pub fn create_default() -> Result<PathBuf> {
        let config_path =
            Self::config_path().ok_or(eyre!("Could not determine the config directory"))?;
        Self::write_default(&config_path)?;
        Ok(config_path)
    }

    fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            log::info!("Config already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err(format!("Failed to create config directory: {}", parent.display()))?;
        }
        std::fs::write(path, DEFAULT_CONFIG)
            .wrap_err(format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get expanded playlist directory path
    pub fn directory_path(&self) -> PathBuf {
        self.expand_path(&self.file_info.directory_path)
    }

    pub fn data_order(&self) -> DataOrder {
        self.file_info.data_order
    }

    pub fn data_delimiter(&self) -> &str {
        &self.file_info.data_delimiter
    }

    pub fn user_id(&self) -> &str {
        &self.api.user_id
    }

    pub fn access_token(&self) -> &str {
        &self.api.access_token
    }

    pub fn api_base_url(&self) -> Result<Url> {
        let base_url = self.api.base_url.as_deref().unwrap_or(SPOTIFY_API_BASE_URL);
        Url::parse(base_url).wrap_err(format!("Invalid Spotify API base URL: {}", base_url))
    }

    pub fn set_directory_path(&mut self, directory: &Path) {
        self.file_info.directory_path = directory.to_string_lossy().into_owned();
    }

    pub fn set_access_token(&mut self, access_token: String) {
        self.api.access_token = access_token;
    }

    pub fn set_user_id(&mut self, user_id: String) {
        self.api.user_id = user_id;
    }

    /// Fails listing every required key that has an empty value.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("directory_path", &self.file_info.directory_path),
            ("data_delimiter", &self.file_info.data_delimiter),
            ("user_id", &self.api.user_id),
            ("access_token", &self.api.access_token),
        ];
        let empty_keys: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(key, _)| *key)
            .collect();

        if !empty_keys.is_empty() {
            return Err(eyre!(
                "Missing values for key(s) {}",
                quote_each_word(&empty_keys)
            ));
        }

        self.api_base_url()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"
[file_info]
directory_path = "~/music/playlists"
data_order = "artist track"
data_delimiter = ","

[api]
user_id = "sp_userid"
access_token = "token"
"#;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_quote_each_word() {
        assert_eq!(quote_each_word(&["foo", "bar"]), "'foo', 'bar'");
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_file(&write_config(&dir, VALID)).unwrap();

        assert_eq!(config.data_order(), DataOrder::ArtistTrack);
        assert_eq!(config.data_delimiter(), ",");
        assert_eq!(config.user_id(), "sp_userid");
        assert_eq!(config.access_token(), "token");
        assert_eq!(config.api_base_url().unwrap().as_str(), SPOTIFY_API_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_directory_path_expands_home() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_file(&write_config(&dir, VALID)).unwrap();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.directory_path(), home.join("music/playlists"));
        }
    }

    #[test]
    fn test_from_file_missing_section() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api]\nuser_id = \"a\"\naccess_token = \"b\"\n");

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_from_file_rejects_unknown_data_order() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &VALID.replace("artist track", "artist,track"));

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_validate_lists_all_empty_keys() {
        let dir = TempDir::new().unwrap();
        let contents = VALID
            .replace("\"sp_userid\"", "\"\"")
            .replace("\"token\"", "\"\"");
        let config = Config::from_file(&write_config(&dir, &contents)).unwrap();

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing values for key(s) 'user_id', 'access_token'"
        );
    }

    #[test]
    fn test_overrides_fill_missing_values() {
        let dir = TempDir::new().unwrap();
        let contents = VALID.replace("\"token\"", "\"\"");
        let mut config = Config::from_file(&write_config(&dir, &contents)).unwrap();
        assert!(config.validate().is_err());

        config.set_access_token("from-env".to_string());
        config.set_user_id("other".to_string());
        config.set_directory_path(dir.path());

        assert!(config.validate().is_ok());
        assert_eq!(config.access_token(), "from-env");
        assert_eq!(config.user_id(), "other");
        assert_eq!(config.directory_path(), dir.path());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let dir = TempDir::new().unwrap();
        let contents = format!("{}base_url = \"not a url\"\n", VALID);
        let config = Config::from_file(&write_config(&dir, &contents)).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_template_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::write_default(&path).unwrap();
        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.data_order(), DataOrder::TrackArtist);
        assert_eq!(config.data_delimiter(), " - ");
        // Credentials must be filled in by the user
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_write_default_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);

        Config::write_default(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), VALID);
    }
}
