use soittobotti::components::google_calendar::models::CalendarEvent;
use soittobotti::components::google_calendar::time::get_event_start;
use soittobotti::components::scheduling::{extract_phone_number, DedupPolicy};
use soittobotti::config::Config;
use soittobotti::error::BotResult;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock implementation of the calendar source for testing
#[derive(Debug, Clone, Default)]
pub struct MockCalendarHandle {
    events: Vec<CalendarEvent>,
}

impl MockCalendarHandle {
    /// Create a new mock handle with predefined events
    pub fn new() -> Self {
        let events = vec![
            CalendarEvent {
                id: "event1".to_string(),
                summary: Some("Standup".to_string()),
                description: Some("Join by phone: dial 555-123-4567".to_string()),
                created: Some("2030-01-01T00:00:00Z".to_string()),
                start_date_time: Some("2030-01-01T10:00:00Z".to_string()),
                end_date_time: Some("2030-01-01T10:15:00Z".to_string()),
                ..Default::default()
            },
            CalendarEvent {
                id: "event2".to_string(),
                summary: Some("Company offsite".to_string()),
                description: Some("Attendance in person, no dial-in".to_string()),
                created: Some("2030-01-01T00:00:00Z".to_string()),
                start_date: Some("2030-01-02".to_string()),
                end_date: Some("2030-01-03".to_string()),
                ..Default::default()
            },
        ];

        Self { events }
    }

    /// Get upcoming events from the mock
    pub async fn get_upcoming_events(&self) -> BotResult<Vec<CalendarEvent>> {
        Ok(self.events.clone())
    }
}

/// Test that demonstrates how to use the mock
#[tokio::test]
async fn test_calendar_mock() {
    // Create the mock
    let mock_handle = MockCalendarHandle::new();

    // Get events from the mock
    let events = mock_handle.get_upcoming_events().await.unwrap();

    // Verify events
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "event1");
    assert_eq!(events[1].id, "event2");

    // The standup carries a dial-in number and a concrete start
    assert_eq!(
        extract_phone_number(events[0].description.as_deref()),
        Some("555-123-4567".to_string())
    );
    assert!(get_event_start(&events[0]).unwrap().is_some());

    // The offsite is all-day and has no number
    assert_eq!(extract_phone_number(events[1].description.as_deref()), None);
    assert!(get_event_start(&events[1]).unwrap().is_none());
}

/// Test the configuration alongside the mock calendar
#[tokio::test]
async fn test_calendar_with_config() {
    // Create a test configuration
    let config = Arc::new(RwLock::new(Config {
        twilio_account_sid: "ACtest".to_string(),
        twilio_auth_token: "test_auth_token".to_string(),
        twilio_phone_number: "+15550001111".to_string(),
        my_phone_number: "+15552223333".to_string(),
        app_url: "https://example.com".to_string(),
        google_client_id: "test_client_id".to_string(),
        google_client_secret: "test_client_secret".to_string(),
        google_calendar_id: "test_calendar_id".to_string(),
        google_token_file: "token.json".to_string(),
        poll_interval_secs: 300,
        lookahead_secs: 3600,
        dedup_policy: DedupPolicy::EventId,
        port: 5000,
    }));

    // Create a mock calendar handle
    let mock_handle = MockCalendarHandle::new();

    // Test reading calendar ID from config
    let calendar_id = {
        let config_guard = config.read().await;
        config_guard.google_calendar_id.clone()
    };

    assert_eq!(calendar_id, "test_calendar_id");

    // Test getting events
    let events = mock_handle.get_upcoming_events().await.unwrap();
    assert!(!events.is_empty());
}
