pub mod cors;

use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::news::NewsController;
use crate::infrastructure::auth::{request_id_middleware, webhook_secret_middleware};
use crate::infrastructure::config::Config;
use cors::cors_middleware;

/// Build the application router. Every path is served by the news handler.
pub fn build_router(config: Arc<Config>, news_controller: Arc<NewsController>) -> Router {
    Router::new()
        .fallback(NewsController::handle)
        .with_state(news_controller)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(cors_middleware))
                .layer(middleware::from_fn_with_state(
                    config,
                    webhook_secret_middleware,
                )),
        )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    news_controller: Arc<NewsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(config.clone(), news_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
