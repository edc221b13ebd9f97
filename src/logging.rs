use std::path::PathBuf;
use std::time::SystemTime;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Installs the global logger: colored output on stderr plus an optional log file,
/// each with its own level.
pub fn setup_logging(
    console_level: LevelFilter,
    log_file: Option<PathBuf>,
    file_level: LevelFilter,
) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(console_level)
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        // The HTTP stack is chatty at debug level
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Info)
        .chain(console);

    if let Some(path) = log_file {
        let file = fern::log_file(&path)
            .wrap_err(format!("Failed to open log file: {}", path.display()))?;

        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} {} {}] {}",
                        humantime::format_rfc3339_seconds(SystemTime::now()),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .level(file_level)
                .chain(file),
        );
    }

    dispatch.apply().wrap_err("Failed to install logger")?;

    Ok(())
}
