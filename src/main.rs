mod config;
mod logging;
mod playlist_file;
mod ports;
mod services;
mod spotify_rs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};

use crate::{
    config::Config,
    logging::setup_logging,
    playlist_file::{PlaylistFile, load_playlists},
    ports::spotify::SpotifyClient,
    services::spotify::{
        client::SpotifyHttpAdapter, playlist_populator::PlaylistPopulator,
        types::ConversionOutcome,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "PLAYLIST_CONVERTER_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level
    #[arg(long, default_value = "warn", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "PLAYLIST_CONVERTER_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn is_directory(s: &str) -> Result<PathBuf, String> {
    let p: PathBuf = s.into();
    if p.is_dir() {
        Ok(p)
    } else {
        Err(format!("`{}` is not an existing directory", s))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a Spotify playlist for every playlist file
    Convert {
        /// Directory with the playlist files (overrides the config)
        #[arg(short, long, value_parser = is_directory)]
        directory: Option<PathBuf>,

        /// Spotify access token (overrides the config)
        #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// Spotify user id that will own the playlists (overrides the config)
        #[arg(long, env = "SPOTIFY_USER_ID")]
        user_id: Option<String>,

        /// Continue with the next file when a conversion fails
        #[arg(long)]
        keep_going: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

fn print_outcome(name: &str, outcome: &ConversionOutcome) {
    match outcome {
        ConversionOutcome::Created {
            playlist_id,
            tracks_added,
            ..
        } => println!(
            "Created playlist '{}' ({}) with {} tracks",
            name, playlist_id, tracks_added
        ),
        ConversionOutcome::Skipped { .. } => {
            println!("Skipped '{}': no tracks found on Spotify", name)
        }
    }

    for query in outcome.unresolved() {
        println!("  not found: {}", query);
    }
}

async fn convert_file<C: SpotifyClient>(
    populator: &PlaylistPopulator<C>,
    file: &PlaylistFile,
    config: &Config,
) -> Result<()> {
    let name = file.playlist_name();
    let items = file.playlist_items(config.data_delimiter(), config.data_order());
    log::debug!(
        "Read {} items from {} for playlist '{}'",
        items.len(),
        file.path().display(),
        name
    );

    let outcome = populator
        .convert(name, &items)
        .await
        .wrap_err(format!("Failed to convert playlist '{}'", name))?;
    print_outcome(name, &outcome);

    Ok(())
}

async fn convert_files(config: &Config, keep_going: bool) -> Result<()> {
    let directory = config.directory_path();
    let files = load_playlists(&directory)
        .wrap_err("Something went wrong reading the directory path")?;
    log::info!("Found {} playlist files in {}", files.len(), directory.display());

    let api = spotify_rs::client::SpotifyClient::new(
        config.access_token().to_string(),
        config.user_id().to_string(),
        config.api_base_url()?,
    )?;
    let populator = PlaylistPopulator::new(SpotifyHttpAdapter::new(api));

    let mut failed = 0;
    for file in &files {
        match convert_file(&populator, file, config).await {
            Ok(()) => {}
            Err(err) if keep_going => {
                failed += 1;
                log::error!("{:?}", err);
                eprintln!("Error: {:#}", err);
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        return Err(eyre!("{} of {} playlists failed to convert", failed, files.len()));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Playlist converter starting");

    match args.command {
        Commands::Convert {
            directory,
            access_token,
            user_id,
            keep_going,
        } => {
            log::debug!("Loading configuration");
            let mut config = {
                if let Some(config) = args.config {
                    Config::from_file(&config)
                } else {
                    Config::load()
                }
            }
            .wrap_err("Something went wrong reading your config file")?;

            if let Some(directory) = directory {
                config.set_directory_path(&directory);
            }
            if let Some(access_token) = access_token {
                config.set_access_token(access_token);
            }
            if let Some(user_id) = user_id {
                config.set_user_id(user_id);
            }
            config
                .validate()
                .wrap_err("Something went wrong reading your config file")?;

            convert_files(&config, keep_going).await?;
            log::info!("Convert command completed successfully");
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default()?;
                println!("{}", path.display());
                log::info!("Default config created successfully");
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
