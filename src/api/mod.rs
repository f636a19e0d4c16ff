//! REST API - JSON endpoints for calculations and saved snapshots.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/health` | liveness and version |
//! | GET | `/api/presets` | calculator presets |
//! | POST | `/api/calculate` | validate and project one calculation |
//! | POST | `/api/compare` | validate and project up to four scenarios |
//! | GET, POST | `/api/saved-calculations` | list, save |
//! | GET, PATCH, DELETE | `/api/saved-calculations/:id` | fetch, rename, delete |
//! | POST | `/api/saved-calculations/:id/duplicate` | save a copy named `"<name> (Copy)"` |

/// Error to HTTP response mapping
pub mod error;
/// Endpoint handlers
pub mod routes;
/// Shared handler state
pub mod state;

use crate::errors::Result;
use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds the API router with CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/presets", get(routes::calculations::presets))
        .route("/calculate", post(routes::calculations::calculate_one))
        .route("/compare", post(routes::calculations::compare))
        .route(
            "/saved-calculations",
            get(routes::saved::list).post(routes::saved::create),
        )
        .route(
            "/saved-calculations/:id",
            get(routes::saved::get)
                .patch(routes::saved::rename)
                .delete(routes::saved::delete),
        )
        .route(
            "/saved-calculations/:id/duplicate",
            post(routes::saved::duplicate),
        )
}

/// Serves the API on `addr` until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("CorpusBuddy API listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
