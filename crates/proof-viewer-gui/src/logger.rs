use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

/// In-app log collector; the newest entry feeds the status bar and the
/// full ring buffer backs the log window.
#[derive(Clone)]
pub struct AppLogger {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl AppLogger {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(LevelFilter::Info);
        Ok(())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<LogEntry> {
        self.entries.lock().unwrap().back().cloned()
    }
}

impl log::Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut entries = self.entries.lock().unwrap();
        if entries.len() == self.max_entries {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            message: format!("{}", record.args()),
        });
    }

    fn flush(&self) {}
}
