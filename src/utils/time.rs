use crate::components::google_calendar::models::CalendarEvent;
use chrono::DateTime;

/// Human-readable start time for the listing page
///
/// Timed events show their local wall-clock time as delivered by the
/// calendar; all-day events show the date. Unparseable timestamps fall back
/// to the raw string rather than hiding the event.
pub fn format_event_start(event: &CalendarEvent) -> String {
    if let Some(raw) = &event.start_date_time {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(start) => start.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => raw.clone(),
        }
    } else if let Some(date) = &event.start_date {
        format!("{} (all day)", date)
    } else {
        String::from("unscheduled")
    }
}
