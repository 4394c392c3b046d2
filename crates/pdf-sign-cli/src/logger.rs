use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Logger that echoes records to stderr and keeps the most recent ones
#[derive(Clone)]
pub struct CliLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    max_entries: usize,
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(max_entries: usize, verbose: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            max_entries,
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Recorded entries at `level` or more severe
    pub fn entries_at(&self, level: Level) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries
                .iter()
                .filter(|entry| entry.level <= level)
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn record(&self, entry: LogEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.push(entry);

        // Keep only the most recent entries
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(0..excess);
        }
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: format!("{}", record.args()),
        };
        eprintln!(
            "{} {:<5} [{}] {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.level,
            entry.target,
            entry.message
        );
        self.record(entry);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn log_at(logger: &CliLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("pdfsign")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_buffer_keeps_most_recent_entries() {
        let logger = CliLogger::new(2, true);
        log_at(&logger, Level::Info, "one");
        log_at(&logger, Level::Warn, "two");
        log_at(&logger, Level::Error, "three");

        let messages: Vec<_> = logger
            .entries_at(Level::Trace)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_quiet_logger_drops_info() {
        let logger = CliLogger::new(10, false);
        log_at(&logger, Level::Info, "skipped");
        log_at(&logger, Level::Warn, "kept");

        let entries = logger.entries_at(Level::Trace);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
        assert_eq!(logger.entries_at(Level::Error).len(), 0);
    }
}
