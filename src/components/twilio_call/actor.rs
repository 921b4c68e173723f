use crate::config::Config;
use crate::error::{twilio_error, BotResult};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;

/// The Twilio actor that places outbound calls
pub struct TwilioCallActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<TwilioCallCommand>,
}

/// Commands that can be sent to the Twilio actor
pub enum TwilioCallCommand {
    PlaceCall {
        meeting_phone: String,
        event_name: String,
        response_tx: mpsc::Sender<BotResult<String>>,
    },
    Shutdown,
}

/// Handle for communicating with the Twilio actor
#[derive(Clone)]
pub struct TwilioCallActorHandle {
    command_tx: mpsc::Sender<TwilioCallCommand>,
}

impl TwilioCallActorHandle {
    /// Place the first call leg to the owner
    pub async fn place_call(&self, meeting_phone: &str, event_name: &str) -> BotResult<String> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(TwilioCallCommand::PlaceCall {
                meeting_phone: meeting_phone.to_string(),
                event_name: event_name.to_string(),
                response_tx,
            })
            .await
            .map_err(|e| twilio_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| twilio_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BotResult<()> {
        let _ = self.command_tx.send(TwilioCallCommand::Shutdown).await;
        Ok(())
    }
}

impl TwilioCallActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, TwilioCallActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            client: Client::new(),
            command_rx,
        };

        let handle = TwilioCallActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Twilio call actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                TwilioCallCommand::PlaceCall {
                    meeting_phone,
                    event_name,
                    response_tx,
                } => {
                    let result = Self::place_call(
                        Arc::clone(&self.config),
                        self.client.clone(),
                        &meeting_phone,
                        &event_name,
                    )
                    .await;

                    let _ = response_tx.send(result).await;
                }
                TwilioCallCommand::Shutdown => {
                    info!("Twilio call actor shutting down");
                    break;
                }
            }
        }

        info!("Twilio call actor shut down");
    }

    /// Call the owner, pointing Twilio at the bridge webhook for voice
    /// instructions once the call is answered
    async fn place_call(
        config: Arc<RwLock<Config>>,
        client: Client,
        meeting_phone: &str,
        event_name: &str,
    ) -> BotResult<String> {
        let (account_sid, auth_token, from_number, to_number, app_url) = {
            let config_read = config.read().await;
            (
                config_read.twilio_account_sid.clone(),
                config_read.twilio_auth_token.clone(),
                config_read.twilio_phone_number.clone(),
                config_read.my_phone_number.clone(),
                config_read.app_url.clone(),
            )
        };

        let webhook_url = bridge_webhook_url(&app_url, meeting_phone, event_name);

        let api_url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Calls.json",
            account_sid
        );

        let params = [
            ("To", to_number.as_str()),
            ("From", from_number.as_str()),
            ("Url", webhook_url.as_str()),
        ];

        let response = client
            .post(&api_url)
            .basic_auth(&account_sid, Some(&auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| twilio_error(&format!("Failed to reach Twilio: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(twilio_error("Twilio rejected the account credentials"));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(twilio_error(&format!(
                "Call creation rejected: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| twilio_error(&format!("Failed to parse call response: {}", e)))?;

        response_data
            .get("sid")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| twilio_error("Call response missing 'sid' field"))
    }
}

/// Callback URL for the bridge webhook, with both parameters percent-encoded
fn bridge_webhook_url(app_url: &str, meeting_phone: &str, event_name: &str) -> String {
    format!(
        "{}/twilio-webhook?meeting_phone={}&event_name={}",
        app_url.trim_end_matches('/'),
        urlencoding::encode(meeting_phone),
        urlencoding::encode(event_name)
    )
}
