//! Logger setup for the driver.
//!
//! Level precedence: `VT_LOG_LEVEL`, then `--log-level`, then the settings
//! file, then `info`.

use std::env;
use std::fmt::{Arguments, Display};
use std::io::IsTerminal;

use anyhow::{Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable that overrides every other log level source.
pub const LOG_LEVEL_VAR: &str = "VT_LOG_LEVEL";

fn parse_level(level: &str) -> Result<LevelFilter> {
    Ok(match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    })
}

/// Install the `fern` dispatcher: warnings and errors on stderr, everything
/// else on stdout, coloured when the stream is a terminal.
pub fn init(requested: Option<&str>) -> Result<()> {
    let level = env::var(LOG_LEVEL_VAR)
        .unwrap_or_else(|_| requested.unwrap_or(DEFAULT_LOG_LEVEL).to_string());
    let level = parse_level(&level)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let colour_stdout = std::io::stdout().is_terminal();
    let colour_stderr = std::io::stderr().is_terminal();

    Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, colour_stdout, &colours);
                })
                .level(level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, colour_stderr, &colours);
                })
                .level(level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        )
        .apply()?;
    Ok(())
}

fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");
    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log(out, record.level(), record.target(), message);
    }
}
