use pizza_restaurant_service::handlers::{app, AppState};
use tracing::info;

use super::Settings;

pub async fn main(settings: &Settings, bind: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = settings.migrated_pool()?;
    let app = app(AppState { pool });

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Pizza restaurants API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
