/// Mission log: a capped, newest-first feed of timestamped messages.
use chrono::Local;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall time, "HH:MM:SS"
    pub timestamp: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct MissionLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl MissionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a message stamped with the current local time
    pub fn append(&mut self, message: impl Into<String>) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.append_at(timestamp, message);
    }

    /// Prepend a message with an explicit timestamp
    pub fn append_at(&mut self, timestamp: impl Into<String>, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: timestamp.into(),
            message: message.into(),
        };
        log::info!("📡 [{}] {}", entry.timestamp, entry.message);

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
