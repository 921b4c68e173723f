use super::pipeline::SchedulingPipeline;
use crate::components::google_calendar::GoogleCalendarHandle;
use crate::config::Config;
use crate::error::BotResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::{error, info};

/// Fetch the upcoming window and run every event through the pipeline
///
/// Shared by the periodic poll and the manual force-check. Returns the
/// number of newly scheduled calls.
pub async fn run_calendar_check(
    calendar: &GoogleCalendarHandle,
    pipeline: &SchedulingPipeline,
) -> BotResult<usize> {
    info!("Checking calendar for upcoming events...");
    let events = calendar.get_upcoming_events().await?;
    Ok(pipeline.process_events(&events))
}

/// Start the periodic calendar poll
///
/// Fetch failures are logged and the loop carries on; one bad cycle never
/// stops the next.
pub fn start_poller(
    config: Arc<RwLock<Config>>,
    calendar: GoogleCalendarHandle,
    pipeline: Arc<SchedulingPipeline>,
) {
    tokio::spawn(async move {
        let interval = {
            let config_read = config.read().await;
            config_read.poll_interval_secs
        };

        loop {
            match run_calendar_check(&calendar, &pipeline).await {
                Ok(scheduled) if scheduled > 0 => {
                    info!("Scheduled {} new call(s)", scheduled);
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Error checking calendar events: {}", e);
                }
            }

            sleep(TokioDuration::from_secs(interval)).await;
        }
    });
}
