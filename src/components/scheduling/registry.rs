use crate::components::google_calendar::CalendarEvent;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How scheduled events are keyed for deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DedupPolicy {
    /// Key on the event id alone; edits to an already-scheduled event are
    /// ignored
    #[default]
    EventId,
    /// Key on id, dial-in number and start time, so an edit to either
    /// schedules a fresh call
    EventContent,
}

impl DedupPolicy {
    /// Parse the configuration value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "event-id" => Some(Self::EventId),
            "event-content" => Some(Self::EventContent),
            _ => None,
        }
    }

    /// Registry key for an event under this policy
    pub fn dedup_key(&self, event: &CalendarEvent, phone: Option<&str>) -> String {
        match self {
            Self::EventId => event.id.clone(),
            Self::EventContent => format!(
                "{}|{}|{}",
                event.id,
                phone.unwrap_or(""),
                event.start_date_time.as_deref().unwrap_or("")
            ),
        }
    }
}

/// Tracks which events have already produced a scheduled call
///
/// Entries are inserted only once a job has actually been submitted and are
/// never removed; the set starts empty and lives for the process lifetime.
#[derive(Debug, Default)]
pub struct EventRegistry {
    scheduled: RwLock<HashSet<String>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a call has been scheduled under this key
    pub fn is_scheduled(&self, key: &str) -> bool {
        self.scheduled.read().contains(key)
    }

    /// Record a submitted call; marking an already-marked key is a no-op
    pub fn mark_scheduled(&self, key: impl Into<String>) {
        self.scheduled.write().insert(key.into());
    }

    /// Number of events with a scheduled call
    pub fn len(&self) -> usize {
        self.scheduled.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.read().is_empty()
    }
}
