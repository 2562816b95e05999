use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::news::{NewsServiceApi, PublishOutcome},
    error::{AppError, AppResult},
    infrastructure::{
        http::cors::{ALLOWED_HEADERS, ALLOWED_METHODS},
        repositories::StoreBackend,
    },
};

pub const IGNORED_MESSAGE: &str = "Ignored bot message or empty content";
pub const STORED_MESSAGE: &str = "News stored successfully!";
pub const UPDATED_MESSAGE: &str = "News updated successfully!";

pub struct NewsController {
    news_service: Arc<dyn NewsServiceApi>,
}

impl NewsController {
    pub fn new(news_service: Arc<dyn NewsServiceApi>) -> Self {
        Self { news_service }
    }

    /// Single entry point for every path, dispatched on method
    pub async fn handle(
        State(controller): State<Arc<NewsController>>,
        method: Method,
        body: Bytes,
    ) -> AppResult<Response> {
        match method {
            Method::OPTIONS => Ok(Self::preflight()),
            Method::GET => controller.list_news().await,
            Method::POST => controller.publish(&body).await,
            _ => Err(AppError::MethodNotAllowed),
        }
    }

    /// OPTIONS - CORS preflight
    fn preflight() -> Response {
        (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            ],
        )
            .into_response()
    }

    /// GET - Current feed, newest first
    async fn list_news(&self) -> AppResult<Response> {
        let items = self.news_service.list_news().await?;
        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// POST - Discord webhook delivery
    async fn publish(&self, body: &[u8]) -> AppResult<Response> {
        let message = match self.news_service.publish(body).await? {
            PublishOutcome::Ignored(_) => IGNORED_MESSAGE,
            PublishOutcome::Stored(StoreBackend::Memory) => STORED_MESSAGE,
            PublishOutcome::Stored(StoreBackend::GitHub) => UPDATED_MESSAGE,
        };
        Ok((StatusCode::OK, message).into_response())
    }
}
