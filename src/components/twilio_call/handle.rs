use super::actor::TwilioCallActorHandle;
use crate::components::scheduling::CallDispatcher;
use crate::config::Config;
use crate::error::BotResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Twilio call actor
#[derive(Clone)]
pub struct TwilioCallHandle {
    actor_handle: TwilioCallActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl TwilioCallHandle {
    /// Create a new TwilioCallHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        use super::actor::TwilioCallActor;

        // Create the actor and get its handle
        let (mut actor, handle) = TwilioCallActor::new(config);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BotResult<()> {
        self.actor_handle.shutdown().await
    }
}

// Fired call jobs dispatch through the actor
#[async_trait]
impl CallDispatcher for TwilioCallHandle {
    async fn place_call(&self, meeting_phone: &str, event_name: &str) -> BotResult<String> {
        self.actor_handle.place_call(meeting_phone, event_name).await
    }
}
