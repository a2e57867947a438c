//! HTTP API for the NeoGreen order intake.
//!
//! Exposes the intake flow over JSON endpoints: session lifecycle, manual
//! edits, assistant chat turns, and submission with WhatsApp hand-off.

mod config;
mod error;
mod routes;
mod state;
mod store;

use assistant::Assistant;
use database::Database;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, profile = config.profile.name, "Starting order intake server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Create the assistant client
    let assistant = Assistant::from_env()?;

    // Build application state
    let state = AppState::new(db, assistant, config.profile, config.whatsapp_number);

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Order intake server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
