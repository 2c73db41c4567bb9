//! Log setup for the binary. The chat UI owns the terminal while it runs,
//! so the default destination is a file next to the working directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const ENV_LOG_LEVEL: &str = "ASSISTANT_LOG";

#[allow(dead_code)]
pub enum LogDestination {
    /// Truncated on every start.
    File(PathBuf),
    Terminal,
    Both(PathBuf),
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr before the UI takes over; the app keeps running without it.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = logger_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    let (file, terminal) = match destination {
        LogDestination::File(path) => (Some(path), false),
        LogDestination::Terminal => (None, true),
        LogDestination::Both(path) => (Some(path), true),
    };
    if terminal {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(path) = file {
        match open_log_file(&path) {
            Ok(out) => loggers.push(WriteLogger::new(level, config, out)),
            Err(err) => eprintln!("assistant: no log file at {}: {err}", path.display()),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(ENV_LOG_LEVEL).ok().as_deref())
}

/// `ASSISTANT_LOG=debug` style values; anything unrecognised means info.
fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn logger_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Debug)
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    File::create(path)
}
