use crate::error::BotResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info};

/// A one-shot call job: at `run_at`, bridge the owner into `meeting_phone`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCall {
    /// Absolute UTC instant at which the job fires
    pub run_at: DateTime<Utc>,
    /// Dial-in number for the second call leg
    pub meeting_phone: String,
    /// Display name spoken in the announcement
    pub event_name: String,
}

/// Places the first call leg once a job fires
#[async_trait]
pub trait CallDispatcher: Send + Sync {
    /// Place the outbound call, returning the provider's call identifier
    async fn place_call(&self, meeting_phone: &str, event_name: &str) -> BotResult<String>;
}

/// One-shot, time-addressed job runner for outbound calls
///
/// Every submitted job runs in its own task, so a slow or failing call
/// cannot delay other pending jobs or the poll loop. Jobs are never
/// cancelled once submitted.
pub struct CallScheduler {
    dispatcher: Arc<dyn CallDispatcher>,
    submitted: AtomicU64,
}

impl CallScheduler {
    pub fn new(dispatcher: Arc<dyn CallDispatcher>) -> Self {
        Self {
            dispatcher,
            submitted: AtomicU64::new(0),
        }
    }

    /// Number of jobs submitted since startup
    pub fn submitted_count(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Register a job; the dispatcher is invoked at or after `run_at`
    ///
    /// Never blocks the caller. A dispatch failure is logged and the job is
    /// considered complete; there is no retry.
    pub fn submit(&self, call: ScheduledCall) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
        let dispatcher = Arc::clone(&self.dispatcher);

        tokio::spawn(async move {
            let wait = (call.run_at - Utc::now()).to_std().unwrap_or_default();
            sleep(wait).await;

            info!(
                "Placing call for '{}' (meeting phone: {})",
                call.event_name, call.meeting_phone
            );
            match dispatcher
                .place_call(&call.meeting_phone, &call.event_name)
                .await
            {
                Ok(sid) => info!(
                    "Initiated call (SID: {}) for meeting phone: {}",
                    sid, call.meeting_phone
                ),
                Err(e) => error!("Failed to place call for '{}': {}", call.event_name, e),
            }
        });
    }
}
