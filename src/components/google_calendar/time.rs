use super::models::CalendarEvent;
use crate::error::{google_calendar_error, BotResult};
use chrono::{DateTime, Utc};

/// Get a timed event's start instant in UTC
///
/// All-day events (a plain date with no timestamp) yield `None`; they are
/// never eligible for a reminder call.
pub fn get_event_start(event: &CalendarEvent) -> BotResult<Option<DateTime<Utc>>> {
    match &event.start_date_time {
        Some(raw) => {
            let start = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                google_calendar_error(&format!("Failed to parse start time '{}': {}", raw, e))
            })?;
            Ok(Some(start.with_timezone(&Utc)))
        }
        None => Ok(None),
    }
}
