pub mod client;
pub mod playlist_populator;
pub mod track_resolver;
pub mod types;
