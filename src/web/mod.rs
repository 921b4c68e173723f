pub mod handlers;

use crate::components::google_calendar::GoogleCalendarHandle;
use crate::components::scheduling::SchedulingPipeline;
use crate::config::Config;
use crate::error::BotResult;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for the HTTP front-end
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<RwLock<Config>>,
    /// Calendar source for the listing page and force-check
    pub calendar: GoogleCalendarHandle,
    /// The scheduling pipeline driven by /force-check
    pub pipeline: Arc<SchedulingPipeline>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/force-check", get(handlers::force_check_handler))
        .route(
            "/twilio-webhook",
            get(handlers::twilio_webhook_handler).post(handlers::twilio_webhook_handler),
        )
        .route("/health", get(handlers::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listen port and serve until the server fails or shuts down
pub async fn serve(state: AppState, port: u16) -> BotResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
