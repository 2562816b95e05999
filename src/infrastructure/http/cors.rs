use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};

pub const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Add `Access-Control-Allow-Origin: *` to every response except a
/// method rejection.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }

    response
}
