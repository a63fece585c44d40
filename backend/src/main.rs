//! Service entry point: tracing, settings, store connection, HTTP server.

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use orgbook::inbound::http::health::HealthState;
use orgbook::server::{Settings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = Settings::from_env();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings).await?;
    server.await
}
