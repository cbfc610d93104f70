mod handlers;
mod state;
mod static_files;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::location::Geocoder;
use crate::weather::WeatherSource;

pub use state::AppState;

pub fn build_router<P>(state: Arc<AppState<P>>) -> Router
where
    P: Geocoder + WeatherSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::index))
        .route("/style.css", get(handlers::style))
        .route("/app.js", get(handlers::script))
        .route("/api/suggest", get(handlers::suggestions::<P>))
        .route("/api/weather", get(handlers::weather::<P>))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start<P>(host: &str, port: u16, state: Arc<AppState<P>>) -> std::io::Result<()>
where
    P: Geocoder + WeatherSource + Send + Sync + 'static,
{
    let app = build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Climatic Weather listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received Ctrl+C, shutting down");
    }
}
