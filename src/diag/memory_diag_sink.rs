use std::sync::Mutex;

use crate::diag::{diag_level::DiagLevel, diag_sink::DiagSink};

/// One captured diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagRecord {
    pub level: DiagLevel,
    pub msg: String,
    pub target: &'static str,
}

/// Sink that keeps every message in memory.
///
/// Meant for tests and for embedders that want to render recent diagnostics
/// in a debug panel. The engine is single-threaded; the mutex only exists
/// because `DiagSink` is shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryDiagSink {
    records: Mutex<Vec<DiagRecord>>,
}

impl MemoryDiagSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far, in arrival order.
    #[must_use]
    pub fn records(&self) -> Vec<DiagRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// True if any captured message at `level` contains `fragment`.
    #[must_use]
    pub fn contains(&self, level: DiagLevel, fragment: &str) -> bool {
        self.records()
            .iter()
            .any(|r| r.level == level && r.msg.contains(fragment))
    }

    /// Number of captured messages at `level`.
    #[must_use]
    pub fn count(&self, level: DiagLevel) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }
}

impl DiagSink for MemoryDiagSink {
    fn log(&self, level: DiagLevel, msg: &str, target: &'static str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(DiagRecord {
                level,
                msg: msg.to_string(),
                target,
            });
        }
    }
}
