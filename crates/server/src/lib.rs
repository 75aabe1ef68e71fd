pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod state;

use std::net::SocketAddr;

pub use api::create_router;
pub use config::Config;
pub use db::create_pool;
pub use state::AppState;

pub async fn run_server(addr: SocketAddr, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let state = AppState::new(pool, config);
    let app = create_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
