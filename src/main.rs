use soittobotti::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Soittobotti");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the calendar watcher and web server
    startup::start_app(config).await
}
