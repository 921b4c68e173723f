use crate::components::google_calendar::GoogleCalendarHandle;
use crate::components::scheduling::{start_poller, CallScheduler, SchedulingPipeline};
use crate::components::twilio_call::TwilioCallHandle;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::web::{self, AppState};
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up the actors, the scheduling pipeline and the web server, then run
/// until the server ends or a shutdown signal arrives
pub async fn start_app(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (port, poll_interval_secs, dedup_policy) = {
        let config_read = config.read().await;
        (
            config_read.port,
            config_read.poll_interval_secs,
            config_read.dedup_policy,
        )
    };

    // Twilio actor places the outbound calls for fired jobs
    let twilio_handle = TwilioCallHandle::new(Arc::clone(&config));

    // Calendar actor serves both the poll loop and the listing page
    let calendar_handle = GoogleCalendarHandle::new(Arc::clone(&config));

    // The pipeline owns the dedup registry and the one-shot job scheduler
    let scheduler = CallScheduler::new(Arc::new(twilio_handle.clone()));
    let pipeline = Arc::new(SchedulingPipeline::new(scheduler, dedup_policy));

    // Start the periodic calendar poll
    info!(
        "Scheduler started, checking calendar every {} seconds",
        poll_interval_secs
    );
    start_poller(
        Arc::clone(&config),
        calendar_handle.clone(),
        Arc::clone(&pipeline),
    );

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone handles for the shutdown handler
    let shutdown_calendar = calendar_handle.clone();
    let shutdown_twilio = twilio_handle.clone();

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_calendar, shutdown_twilio).await;
    });

    // Start the web server
    let state = AppState {
        config: Arc::clone(&config),
        calendar: calendar_handle,
        pipeline,
    };
    let server_handle = tokio::spawn(async move { web::serve(state, port).await });

    // Wait for either the server to end or a shutdown signal
    tokio::select! {
        result = server_handle => {
            info!("HTTP server ended");
            match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => {
                    error!("Server task error: {:?}", e);
                    Err(Error::Other(format!("Server task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down");
            Ok(())
        }
    }
}
