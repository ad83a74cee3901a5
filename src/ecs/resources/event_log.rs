use bevy_ecs::resource::Resource;
use serde::Serialize;

use crate::ecs::time::SimTime;

/// One line of the caravan's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub tick: u64,
    pub time: SimTime,
    pub kind: &'static str,
    pub description: String,
}

/// Accumulates history entries between flushes.
#[derive(Resource, Debug, Clone, Default)]
pub struct EventLog {
    pub entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u64, time: SimTime, kind: &'static str, description: String) {
        self.entries.push(LogEntry {
            tick,
            time,
            kind,
            description,
        });
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
