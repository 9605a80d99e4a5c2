//! Logging setup and the shared logger handle injected into handlers.

// Global static logger handle for flexi_logger
static LOGGER_HANDLE: std::sync::OnceLock<std::sync::Mutex<flexi_logger::LoggerHandle>> =
    std::sync::OnceLock::new();

pub fn init_logging(
    log_level: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or("info");

    let mut logger = Logger::try_with_str(level_str)?;

    if color_enabled {
        logger = logger.format(simple_color_format);
    } else {
        logger = logger.format(simple_format);
    }

    // Configure file output if requested
    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    // Start the logger and store the handle
    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(std::sync::Mutex::new(handle));

    Ok(())
}

/// Reconfigure the log level at runtime
///
/// Only the level can change after initialization; format and file output
/// are fixed by flexi_logger once started.
pub fn reconfigure_logging(log_level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(handle_mutex) = LOGGER_HANDLE.get() {
        if let Ok(mut handle) = handle_mutex.lock() {
            if let Some(level) = log_level {
                let _ = handle.parse_and_push_temp_spec(level);
            }
            Ok(())
        } else {
            Err("Could not acquire logger handle lock".into())
        }
    } else {
        Err("Logger is not initialised. Call init_logging first.".into())
    }
}

// Simple text format without colors
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let level_abbr = match record.level() {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    };

    // Format: "YYYY-MM-DD HH:mm:ss.fff INF [target] message"
    write!(
        w,
        "{} {} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr,
        record.target(),
        record.args()
    )
}

// Simple color format
fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level_colored = match record.level() {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    };

    write!(
        w,
        "{} {} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.target().dimmed(),
        record.args()
    )
}

/// Shared logger handle injected into handlers at load time.
///
/// A thin scoped facade over the global `log` machinery: every line a
/// handler emits carries the handler's scope as the log target, so host
/// and bundle output stay distinguishable in one stream.
#[derive(Debug, Clone)]
pub struct HandlerLogger {
    scope: String,
}

impl HandlerLogger {
    pub fn new(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
        }
    }

    /// Derive a logger for a sub-scope, e.g. a single handler type.
    pub fn scoped(&self, sub: &str) -> HandlerLogger {
        HandlerLogger {
            scope: format!("{}::{}", self.scope, sub),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn error(&self, message: &str) {
        log::error!(target: &self.scope, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        log::warn!(target: &self.scope, "{}", message);
    }

    pub fn info(&self, message: &str) {
        log::info!(target: &self.scope, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        log::debug!(target: &self.scope, "{}", message);
    }

    pub fn trace(&self, message: &str) {
        log::trace!(target: &self.scope, "{}", message);
    }
}
