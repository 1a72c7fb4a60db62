//! Process-wide log sinks for the calculator service.
//!
//! Records go to three transports: the console (through `env_logger`, so
//! `RUST_LOG` keeps working), `error.log` for error records only, and
//! `combined.log` for everything at or above the configured level. File
//! transports write one JSON object per line, tagged with the service name.

use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::Result;

/// Service name attached to every file record.
pub const SERVICE_NAME: &str = "calculator-microservice";

pub const ERROR_LOG_FILE: &str = "error.log";
pub const COMBINED_LOG_FILE: &str = "combined.log";

/// Configuration for the process-wide logger.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the console default filter and `combined.log`
    pub level: LevelFilter,
    /// Directory holding the log files; `None` disables file transports
    pub log_dir: Option<PathBuf>,
    /// Enable console output
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            log_dir: Some(PathBuf::from("logs")),
            console: true,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Parse and set the level from a string such as `info` or `debug`.
    pub fn with_level_str(mut self, level: &str) -> Result<Self> {
        self.level = level.parse().map_err(|_| {
            crate::ServerError::config_error(format!("Invalid log level: {}", level))
        })?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn without_files(mut self) -> Self {
        self.log_dir = None;
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }
}

#[derive(Serialize)]
struct FileRecord<'a> {
    level: &'a str,
    message: String,
    service: &'a str,
    timestamp: String,
}

/// Appends JSON lines to a single file.
pub struct FileTransport {
    path: PathBuf,
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileTransport {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl Into<PathBuf>, level: LevelFilter) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            level,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn accepts(&self, level: Level) -> bool {
        level <= self.level
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        self.file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write one record as a single JSON line.
    pub fn write_record(&self, record: &Record) -> io::Result<()> {
        let level = record.level().as_str().to_ascii_lowercase();
        let entry = FileRecord {
            level: &level,
            message: record.args().to_string(),
            service: SERVICE_NAME,
            timestamp: Utc::now().to_rfc3339(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        // one write per line keeps concurrent records from interleaving
        self.lock().write_all(line.as_bytes())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// The `log::Log` implementation installed for the whole process.
pub struct ServiceLogger {
    console: Option<env_logger::Logger>,
    files: Vec<FileTransport>,
    level: LevelFilter,
}

impl ServiceLogger {
    pub fn new(config: &LoggingConfig) -> Result<Self> {
        let console = if config.console {
            let default_filter = config.level.as_str().to_ascii_lowercase();
            let logger = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(default_filter),
            )
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{}: {}",
                    record.level().as_str().to_ascii_lowercase(),
                    record.args()
                )
            })
            .build();
            Some(logger)
        } else {
            None
        };

        let files = match &config.log_dir {
            Some(dir) => vec![
                FileTransport::open(dir.join(ERROR_LOG_FILE), LevelFilter::Error)?,
                FileTransport::open(dir.join(COMBINED_LOG_FILE), config.level)?,
            ],
            None => Vec::new(),
        };

        Ok(Self {
            console,
            files,
            level: config.level,
        })
    }

    /// Most verbose level any transport accepts.
    pub fn max_level(&self) -> LevelFilter {
        let console = self
            .console
            .as_ref()
            .map(|console| console.filter())
            .unwrap_or(LevelFilter::Off);
        let files = if self.files.is_empty() {
            LevelFilter::Off
        } else {
            self.level
        };
        console.max(files)
    }

    pub fn file_transports(&self) -> &[FileTransport] {
        &self.files
    }

    /// Install as the global logger.
    pub fn install(self) -> Result<()> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for ServiceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(&self, record: &Record) {
        if let Some(console) = &self.console {
            if console.matches(record) {
                console.log(record);
            }
        }

        for transport in &self.files {
            if transport.accepts(record.level()) {
                if let Err(e) = transport.write_record(record) {
                    eprintln!(
                        "Failed to write log record to {}: {}",
                        transport.path().display(),
                        e
                    );
                }
            }
        }
    }

    fn flush(&self) {
        if let Some(console) = &self.console {
            console.flush();
        }
        for transport in &self.files {
            let _ = transport.flush();
        }
    }
}

/// Build the process-wide logger from `config` and install it.
pub fn init(config: &LoggingConfig) -> Result<()> {
    ServiceLogger::new(config)?.install()
}
