mod cache;
mod config;
mod error;
mod flash;
mod handlers;
mod middleware;
mod models;
mod pagination;
mod placeholders;
mod routes;
mod state;
mod views;

use std::sync::Arc;

use admin_api_client::AdminApi;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Settings;
use routes::{build_router, cors_layer};
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let settings = Settings::parse();

    let api = AdminApi::new(&settings.api_base_url, settings.api_timeout())?;
    info!(api = %api.base_url(), "using remote admin API");

    let state = AppState::new(Arc::new(api), &settings)?;

    // Expired cache entries are otherwise only dropped when their key is read again.
    let janitor = state.clone();
    let every = settings.cache_time().max(std::time::Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            janitor.purge_expired();
        }
    });

    let cors = settings.client_url.as_deref().map(cors_layer).transpose()?;
    let app = build_router(state, cors);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "admin dashboard listening");
    axum::serve(listener, app).await?;

    Ok(())
}
