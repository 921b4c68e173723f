use crate::components::scheduling::DedupPolicy;
use crate::error::{config_error, env_error, BotResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Announcement name for events without a title
pub const DEFAULT_EVENT_NAME: &str = "Upcoming Event";

/// Default seconds between calendar checks
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Default lookahead window for upcoming events; must exceed the poll
/// interval so every event is seen on more than one cycle
pub const DEFAULT_LOOKAHEAD_SECS: u64 = 3600;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Main configuration structure for the bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Twilio account SID
    pub twilio_account_sid: String,
    /// Twilio auth token
    pub twilio_auth_token: String,
    /// Twilio number used as caller id for the first call leg
    pub twilio_phone_number: String,
    /// The owner's number: leg 1 calls it, leg 2 presents it as caller id
    pub my_phone_number: String,
    /// Externally reachable base URL for the Twilio webhook
    pub app_url: String,
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Google Calendar ID to monitor
    pub google_calendar_id: String,
    /// Path of the OAuth token JSON file
    pub google_token_file: String,
    /// Seconds between calendar checks
    pub poll_interval_secs: u64,
    /// Seconds of lookahead when fetching upcoming events
    pub lookahead_secs: u64,
    /// How scheduled events are keyed for deduplication
    pub dedup_policy: DedupPolicy,
    /// HTTP listen port
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let twilio_account_sid =
            env::var("TWILIO_ACCOUNT_SID").map_err(|_| env_error("TWILIO_ACCOUNT_SID"))?;
        let twilio_auth_token =
            env::var("TWILIO_AUTH_TOKEN").map_err(|_| env_error("TWILIO_AUTH_TOKEN"))?;
        let twilio_phone_number =
            env::var("TWILIO_PHONE_NUMBER").map_err(|_| env_error("TWILIO_PHONE_NUMBER"))?;
        let my_phone_number =
            env::var("MY_PHONE_NUMBER").map_err(|_| env_error("MY_PHONE_NUMBER"))?;
        let app_url = env::var("APP_URL").map_err(|_| env_error("APP_URL"))?;
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        // Optional values with defaults
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| String::from("primary"));
        let google_token_file =
            env::var("GOOGLE_TOKEN_FILE").unwrap_or_else(|_| String::from("token.json"));

        // Parse numeric values
        let poll_interval_secs = match env::var("POLL_INTERVAL_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| config_error("Invalid POLL_INTERVAL_SECS format"))?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };

        let lookahead_secs = match env::var("LOOKAHEAD_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| config_error("Invalid LOOKAHEAD_SECS format"))?,
            Err(_) => DEFAULT_LOOKAHEAD_SECS,
        };

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| config_error("Invalid PORT format"))?,
            Err(_) => DEFAULT_PORT,
        };

        let dedup_policy = match env::var("DEDUP_POLICY") {
            Ok(value) => DedupPolicy::parse(&value)
                .ok_or_else(|| config_error(&format!("Unknown DEDUP_POLICY: {}", value)))?,
            Err(_) => DedupPolicy::default(),
        };

        Ok(Config {
            twilio_account_sid,
            twilio_auth_token,
            twilio_phone_number,
            my_phone_number,
            // The webhook path is appended to this, so strip any trailing slash
            app_url: app_url.trim_end_matches('/').to_string(),
            google_client_id,
            google_client_secret,
            google_calendar_id,
            google_token_file,
            poll_interval_secs,
            lookahead_secs,
            dedup_policy,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            twilio_account_sid: "ACtest".to_string(),
            twilio_auth_token: "token".to_string(),
            twilio_phone_number: "+15550001111".to_string(),
            my_phone_number: "+15552223333".to_string(),
            app_url: "https://example.com".to_string(),
            google_client_id: String::new(),
            google_client_secret: String::new(),
            google_calendar_id: "primary".to_string(),
            google_token_file: "token.json".to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            lookahead_secs: DEFAULT_LOOKAHEAD_SECS,
            dedup_policy: DedupPolicy::default(),
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn test_defaults() {
        let config = test_config();
        assert_eq!(config.poll_interval_secs, 300);
        assert_eq!(config.lookahead_secs, 3600);
        assert_eq!(config.dedup_policy, DedupPolicy::EventId);
        // The lookahead window must cover more than one poll cycle
        assert!(config.lookahead_secs > config.poll_interval_secs);
    }

    #[test]
    fn test_dedup_policy_parsing() {
        assert_eq!(DedupPolicy::parse("event-id"), Some(DedupPolicy::EventId));
        assert_eq!(
            DedupPolicy::parse("event-content"),
            Some(DedupPolicy::EventContent)
        );
        assert_eq!(DedupPolicy::parse("something-else"), None);
    }
}
