//! HTTP surface of the MindDrift guessing game.
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/start-game` | | `{questions}` |
//! | POST | `/predict` | `{answers}` | `{source, prediction, html_code, url}` |
//! | POST | `/continue-game` | `{answers}` | `{questions}` |
//! | POST | `/confirm-success` | `{answers, prediction, html_content}` | `{status: "saved"}` |
//! | GET | `/generated_pages/<file>.html` | | generated document |
//! | GET | `/health` | | `{status: "ok"}` |
//!
//! Every route answers CORS requests from any origin.

pub mod error;
pub mod routes;
pub mod telemetry;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use minddrift_core::game::PAGES_ROUTE;
use minddrift_core::GameService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

/// Build the application router around a game service.
pub fn router(game: GameService) -> Router {
    let pages = ServeDir::new(game.documents().dir());

    Router::new()
        .route("/health", get(routes::health))
        .route("/start-game", get(routes::start_game))
        .route("/predict", post(routes::predict))
        .route("/continue-game", post(routes::continue_game))
        .route("/confirm-success", post(routes::confirm_success))
        .nest_service(&format!("/{}", PAGES_ROUTE), pages)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(game)
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, game: GameService, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, pages = %game.documents().dir().display(), "minddrift listening");

    axum::serve(listener, router(game))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}
