use axum::{
    extract::{Query, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::config::Config;

/// What the query string says about the secret.
#[derive(Debug, PartialEq, Eq)]
enum ProvidedSecret {
    Absent,
    Value(String),
    /// A query string was sent but could not be decoded
    Unreadable,
}

/// Shared-secret gate for the webhook.
///
/// Every POST must carry `?secret=` matching the configured value. A GET is
/// only checked when it supplies a secret; unauthenticated reads are allowed.
/// Other methods pass through so the handler can answer them.
pub async fn webhook_secret_middleware(
    State(config): State<Arc<Config>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = provided_secret(&request);

    let must_check = match *request.method() {
        Method::POST => true,
        Method::GET => provided != ProvidedSecret::Absent,
        _ => false,
    };

    let authorized = matches!(
        &provided,
        ProvidedSecret::Value(secret) if *secret == config.webhook_secret
    );
    if must_check && !authorized {
        tracing::debug!(method = %request.method(), "Rejected request with invalid secret");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// First `secret` pair of the query string. Repeated keys are allowed and
/// only the first one counts; an empty value counts as absent.
fn provided_secret(request: &Request) -> ProvidedSecret {
    match Query::<Vec<(String, String)>>::try_from_uri(request.uri()) {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .find(|(key, _)| key == "secret")
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
            .map_or(ProvidedSecret::Absent, ProvidedSecret::Value),
        Err(_) => ProvidedSecret::Unreadable,
    }
}
