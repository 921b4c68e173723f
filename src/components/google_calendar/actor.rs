use super::models::CalendarEvent;
use super::token::TokenManager;
use crate::config::Config;
use crate::error::{credential_error, google_calendar_error, BotResult};
use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;
use url::Url;

/// The Google Calendar actor that processes messages
pub struct GoogleCalendarActor {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    GetUpcomingEvents(mpsc::Sender<BotResult<Vec<CalendarEvent>>>),
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Get events starting within the configured lookahead window
    pub async fn get_upcoming_events(&self) -> BotResult<Vec<CalendarEvent>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(GoogleCalendarCommand::GetUpcomingEvents(response_tx))
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| google_calendar_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BotResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config: Arc::clone(&config),
            token_manager: TokenManager::new(config),
            client: Client::new(),
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::GetUpcomingEvents(response_tx) => {
                    let result = Self::get_upcoming_events(
                        Arc::clone(&self.config),
                        self.token_manager.clone(),
                        self.client.clone(),
                    )
                    .await;

                    let _ = response_tx.send(result).await;
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }

    /// Fetch events starting in `[now, now + lookahead)` from the calendar
    pub async fn get_upcoming_events(
        config: Arc<RwLock<Config>>,
        token_manager: TokenManager,
        client: Client,
    ) -> BotResult<Vec<CalendarEvent>> {
        let (calendar_id, lookahead_secs) = {
            let config_read = config.read().await;
            (
                config_read.google_calendar_id.clone(),
                config_read.lookahead_secs,
            )
        };

        // Get authentication token
        let token = token_manager.get_token().await?;
        let access_token = token
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| credential_error("No access token available"))?;

        // Only events starting inside the lookahead window are of interest;
        // expanding recurring events keeps the dedup key stable per instance
        let now = Utc::now();
        let time_min = now.to_rfc3339();
        let time_max = (now + Duration::seconds(lookahead_secs as i64)).to_rfc3339();

        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );

        let mut url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("timeMin", &time_min)
            .append_pair("timeMax", &time_max)
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        // Make API request
        let response = client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED || response.status() == StatusCode::FORBIDDEN
        {
            return Err(credential_error(&format!(
                "Calendar rejected the access token: HTTP {}",
                response.status()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        // Parse events from response
        let events = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| google_calendar_error("No items in response"))?;

        Ok(events.iter().map(parse_event).collect())
    }
}

/// Convert one API response item into a CalendarEvent
fn parse_event(event: &serde_json::Value) -> CalendarEvent {
    let text_field = |value: &serde_json::Value, field: &str| {
        value.get(field).and_then(|v| v.as_str()).map(String::from)
    };
    let nested_time = |outer: &str, inner: &str| {
        event
            .get(outer)
            .and_then(|o| o.get(inner))
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    CalendarEvent {
        id: event
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or("")
            .to_string(),
        summary: text_field(event, "summary"),
        description: text_field(event, "description"),
        created: text_field(event, "created"),
        start_date_time: nested_time("start", "dateTime"),
        start_date: nested_time("start", "date"),
        end_date_time: nested_time("end", "dateTime"),
        end_date: nested_time("end", "date"),
    }
}
