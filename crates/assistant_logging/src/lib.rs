#![deny(missing_docs)]
//! Logging front door for every assistant crate.
//!
//! Code logs through the `assistant_*` macros so the backing logger can be
//! chosen by the binary (a log file) or by tests (stderr).

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! assistant_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! assistant_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! assistant_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! assistant_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! assistant_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens user-provided text for log lines so prompts and file contents
/// never flood the log.
pub fn clip_for_log(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let clipped: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{clipped}…")
    } else {
        clipped
    }
}

/// Sends log output to stderr for test runs. Safe to call from every test;
/// only the first call installs the logger.
pub fn initialize_for_tests() {
    static INSTALL: std::sync::Once = std::sync::Once::new();
    INSTALL.call_once(|| {
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        // Another test harness may already own the global logger.
        let _ = simplelog::TermLogger::init(
            level,
            simplelog::Config::default(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Never,
        );
    });
}
