use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::Arguments;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use fern::FormatCallback;
use log::{Record, info};

/// Initialize the global logger.
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - None = stdout, Some = append to that file
/// * `colored` - Colored levels on stdout (ignored for file output)
pub fn initialize(
    log_level: tm_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let output = match &log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", path.display(), e),
            })?;
            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, None))
                .chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);
            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, Some(&colors))
                })
                .chain(std::io::stdout())
        }
        // Plain output for systemd / docker logs
        None => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, None))
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        // sqlx logs every statement at info
        .level_for("sqlx", log::LevelFilter::Warn)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match &log_file {
        Some(path) => info!("Logger initialized: level={}, file={}", level_filter, path.display()),
        None => info!("Logger initialized: level={}, stdout", level_filter),
    }

    // Route `tracing` events from dependencies into `log`
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn write_line(
    out: FormatCallback<'_>,
    message: &Arguments<'_>,
    record: &Record<'_>,
    colors: Option<&ColoredLevelConfig>,
) {
    let stamp = humantime::format_rfc3339_millis(SystemTime::now());
    let file = record.file().unwrap_or("unknown");
    let line = record.line().unwrap_or(0);

    match colors {
        Some(colors) => out.finish(format_args!(
            "[{stamp} - {}] {message} [{file}:{line}]",
            colors.color(record.level())
        )),
        None => out.finish(format_args!(
            "[{stamp} - {}] {message} [{file}:{line}]",
            record.level()
        )),
    }
}
