use super::AppState;
use crate::components::google_calendar::models::CalendarEvent;
use crate::components::scheduling::run_calendar_check;
use crate::components::twilio_call::twiml;
use crate::utils::time::format_event_start;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub flash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookParams {
    pub meeting_phone: Option<String>,
    pub event_name: Option<String>,
}

/// Handler for the index page: upcoming events and control options
pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> impl IntoResponse {
    let (events, fetch_error) = match state.calendar.get_upcoming_events().await {
        Ok(events) => (events, None),
        Err(e) => {
            error!("Failed to fetch events for listing: {}", e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    Html(render_index(
        &events,
        params.flash.as_deref(),
        fetch_error.as_deref(),
        state.pipeline.scheduled_count(),
    ))
}

/// Handler for the manual check: run one pipeline pass and redirect back
pub async fn force_check_handler(State(state): State<AppState>) -> Redirect {
    let message = match run_calendar_check(&state.calendar, &state.pipeline).await {
        Ok(scheduled) => format!(
            "Calendar checked successfully! {} new call(s) scheduled.",
            scheduled
        ),
        Err(e) => {
            error!("Forced calendar check failed: {}", e);
            format!("Error checking calendar: {}", e)
        }
    };

    Redirect::to(&format!("/?flash={}", urlencoding::encode(&message)))
}

/// Handler for the Twilio webhook: respond with the call-bridging TwiML
///
/// Everything needed to render the response travels in the request; there
/// is no server-side session to look up.
pub async fn twilio_webhook_handler(
    State(state): State<AppState>,
    Query(params): Query<WebhookParams>,
) -> impl IntoResponse {
    let caller_id = {
        let config_read = state.config.read().await;
        config_read.my_phone_number.clone()
    };

    info!(
        "Rendering bridge response (meeting phone: {})",
        params.meeting_phone.as_deref().unwrap_or("<missing>")
    );

    let body = twiml::bridge_response(
        params.meeting_phone.as_deref(),
        params.event_name.as_deref(),
        &caller_id,
    );

    ([(header::CONTENT_TYPE, "text/xml")], body)
}

/// Handler for health checks
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Escape HTML-reserved characters in user-controlled text
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the event listing page
fn render_index(
    events: &[CalendarEvent],
    flash: Option<&str>,
    fetch_error: Option<&str>,
    scheduled_count: usize,
) -> String {
    let mut page = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Soittobotti</title></head>\n<body>\n<h1>Upcoming events</h1>\n",
    );

    if let Some(message) = flash {
        page.push_str(&format!("<p><em>{}</em></p>\n", html_escape(message)));
    }

    if let Some(message) = fetch_error {
        page.push_str(&format!(
            "<p><strong>Could not read the calendar:</strong> {}</p>\n",
            html_escape(message)
        ));
    }

    if events.is_empty() {
        page.push_str("<p>No upcoming events.</p>\n");
    } else {
        page.push_str("<ul>\n");
        for event in events {
            page.push_str(&format!(
                "<li>{} ({})</li>\n",
                html_escape(event.display_name()),
                html_escape(&format_event_start(event))
            ));
        }
        page.push_str("</ul>\n");
    }

    page.push_str(&format!(
        "<p>{} call(s) scheduled since startup.</p>\n",
        scheduled_count
    ));
    page.push_str("<p><a href=\"/force-check\">Check calendar now</a></p>\n</body>\n</html>\n");

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_lists_events() {
        let events = vec![CalendarEvent {
            id: "e1".to_string(),
            summary: Some("Standup".to_string()),
            start_date_time: Some("2024-01-01T10:00:00Z".to_string()),
            ..Default::default()
        }];

        let page = render_index(&events, Some("Checked!"), None, 1);
        assert!(page.contains("Standup"));
        assert!(page.contains("Checked!"));
        assert!(page.contains("1 call(s) scheduled"));
    }

    #[test]
    fn test_render_index_escapes_event_names() {
        let events = vec![CalendarEvent {
            id: "e1".to_string(),
            summary: Some("<script>alert(1)</script>".to_string()),
            ..Default::default()
        }];

        let page = render_index(&events, None, None, 0);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_index_shows_fetch_error() {
        let page = render_index(&[], None, Some("Credential error: token missing"), 0);
        assert!(page.contains("Could not read the calendar"));
        assert!(page.contains("token missing"));
    }
}
