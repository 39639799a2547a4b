//! Process-wide logging for the `durq` binary
//!
//! The library only emits through the `log` facade. The binary installs a
//! flexi_logger backend here, once, with one of three line formats.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Held for the life of the process; dropping it would stop the logger
static LOGGER_HANDLE: OnceLock<flexi_logger::LoggerHandle> = OnceLock::new();

/// Line format for log output
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// `timestamp LVL message`
    #[default]
    Text,
    /// `timestamp LVL message (module/path.rs:line)`
    Ext,
    /// One compact JSON object per line
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub color: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            file: None,
            color: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger setup failed: {0}")]
    Setup(#[from] flexi_logger::FlexiLoggerError),

    #[error("Logger has already been initialised")]
    AlreadyInitialised,
}

/// Install the global logger
///
/// Can only succeed once per process; later calls return `AlreadyInitialised`.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    if LOGGER_HANDLE.get().is_some() {
        return Err(LoggingError::AlreadyInitialised);
    }

    let mut logger = flexi_logger::Logger::try_with_str(&settings.level)?;

    logger = match (settings.format, settings.color) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(ext_color_format),
        (LogFormat::Ext, false) => logger.format(ext_format),
        (LogFormat::Text, true) => logger.format(text_color_format),
        (LogFormat::Text, false) => logger.format(text_format),
    };

    if let Some(file) = &settings.file {
        logger = logger.log_to_file(flexi_logger::FileSpec::try_from(file.as_path())?);
    }

    let handle = logger.start()?;
    LOGGER_HANDLE
        .set(handle)
        .map_err(|_| LoggingError::AlreadyInitialised)
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn text_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn text_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level = level_abbr(record.level());
    let level_colored = match record.level() {
        log::Level::Error => level.red().bold(),
        log::Level::Warn => level.yellow(),
        log::Level::Info => level.green(),
        log::Level::Debug => level.blue(),
        log::Level::Trace => level.magenta(),
    };

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.args()
    )
}

fn ext_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn ext_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level = level_abbr(record.level());
    let level_colored = match record.level() {
        log::Level::Error => level.red().bold(),
        log::Level::Warn => level.yellow(),
        log::Level::Info => level.green(),
        log::Level::Debug => level.blue(),
        log::Level::Trace => level.magenta(),
    };

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
    });

    match serde_json::to_string(&line) {
        Ok(json) => w.write_all(json.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

/// `durq::queue::persistent` + line 42 -> `queue/persistent.rs:42`
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("durq::") {
        Some(module) => Path::new(&module.replace("::", "/"))
            .with_extension("rs")
            .to_string_lossy()
            .into_owned(),
        None => target.replace("::", "/"),
    };

    match line {
        Some(line) => format!("{}:{}", path_like, line),
        None => path_like,
    }
}
