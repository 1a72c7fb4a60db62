//! Logger capability injected into the evaluation pipeline.
//!
//! The pipeline never talks to a global sink directly. Production code hands
//! it a [`LogOperationLogger`], which forwards to the `log` facade; tests hand
//! it a [`RecordingLogger`] and assert on the captured records.

use log::Level;
use std::sync::{Arc, Mutex, MutexGuard};

/// Log target used for records emitted by the evaluation pipeline.
pub const LOG_TARGET: &str = "calculator";

/// Sink for the single record each evaluation emits.
///
/// Implementations must be safe to share across concurrently running
/// requests.
pub trait OperationLogger: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}

impl<T: OperationLogger + ?Sized> OperationLogger for Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

impl<T: OperationLogger + ?Sized> OperationLogger for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Forwards records to whatever `log` implementation the process installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOperationLogger;

impl LogOperationLogger {
    pub fn new() -> Self {
        Self
    }
}

impl OperationLogger for LogOperationLogger {
    fn info(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "{}", message);
    }
}

/// A captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// Keeps every record in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, level: Level, message: &str) {
        self.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }

    /// Snapshot of the records captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl OperationLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
