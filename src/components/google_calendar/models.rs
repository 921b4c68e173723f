use crate::config::DEFAULT_EVENT_NAME;

/// Simplified calendar event representation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub created: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
}

impl CalendarEvent {
    /// Name used for announcements and listings; untitled events get a
    /// generic placeholder
    pub fn display_name(&self) -> &str {
        self.summary.as_deref().unwrap_or(DEFAULT_EVENT_NAME)
    }

    /// All-day events carry a plain date instead of a timestamp
    pub fn is_all_day(&self) -> bool {
        self.start_date_time.is_none() && self.start_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let event = CalendarEvent {
            id: "e1".to_string(),
            summary: Some("Standup".to_string()),
            ..Default::default()
        };
        assert_eq!(event.display_name(), "Standup");

        let untitled = CalendarEvent {
            id: "e2".to_string(),
            ..Default::default()
        };
        assert_eq!(untitled.display_name(), "Upcoming Event");
    }

    #[test]
    fn test_all_day_detection() {
        let all_day = CalendarEvent {
            id: "e1".to_string(),
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(all_day.is_all_day());

        let timed = CalendarEvent {
            id: "e2".to_string(),
            start_date_time: Some("2024-01-01T10:00:00Z".to_string()),
            ..Default::default()
        };
        assert!(!timed.is_all_day());
    }
}
