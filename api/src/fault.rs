//! Fault handling at the transport boundary
//!
//! - `fault_handler`: terminal middleware that logs every fault and renders it
//! - `panic_to_fault`: turns a handler panic into an internal fault
//! - `not_found`: fallback for requests no route claims

use std::any::Any;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, Fault};

/// Fault handler middleware
///
/// Any response produced from an `AppError` carries a `Fault` extension.
/// The fault is logged with the request method and path, and re-rendered
/// with its stack only when development mode was set explicitly.
pub async fn fault_handler(
    State(config): State<Config>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let Some(fault) = response.extensions().get::<Fault>().cloned() else {
        return response;
    };

    let status = fault.status.as_u16();
    if fault.status.is_server_error() {
        tracing::error!(%method, %path, status, message = %fault.message, "Request failed");
    } else {
        tracing::warn!(%method, %path, status, message = %fault.message, "Request rejected");
    }

    if config.is_development() {
        fault.render(true)
    } else {
        response
    }
}

/// Panic handler for `CatchPanicLayer`
pub fn panic_to_fault(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal Server Error".to_string()
    };

    AppError::internal().with_message(message).into_response()
}

#[derive(Serialize)]
pub struct RouteNotFound {
    pub error: &'static str,
}

/// Fallback for unmatched routes and methods
///
/// Deliberately not a `Fault`: the body is `{ "error": "Not Found" }`.
pub async fn not_found() -> (StatusCode, Json<RouteNotFound>) {
    (StatusCode::NOT_FOUND, Json(RouteNotFound { error: "Not Found" }))
}

#[cfg(test)]
mod tests {
    use axum::{middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    use super::*;
    use crate::test_utils::{dev_config, test_config};

    async fn failing() -> Result<&'static str, AppError> {
        Err(AppError::conflict().with_message("Already there"))
    }

    async fn panicking() -> &'static str {
        panic!("boom")
    }

    async fn fine() -> &'static str {
        "ok"
    }

    fn app(config: Config) -> Router {
        Router::new()
            .route("/fail", get(failing))
            .route("/panic", get(panicking))
            .route("/fine", get(fine))
            .fallback(not_found)
            .layer(CatchPanicLayer::custom(panic_to_fault))
            .layer(middleware::from_fn_with_state(config, fault_handler))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn structured_error_is_rendered() {
        let (status, body) = call(app(test_config()), "/fail").await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 409);
        assert_eq!(body["message"], "Already there");
        assert!(body.get("errors").is_none());
        assert!(body.get("stack").is_none());
    }

    #[tokio::test]
    async fn development_mode_includes_stack() {
        let (status, body) = call(app(dev_config()), "/fail").await;

        assert_eq!(status, StatusCode::CONFLICT);
        let stack = body["stack"].as_str().unwrap();
        assert!(stack.starts_with("Conflict: Already there"));
    }

    #[tokio::test]
    async fn panic_becomes_internal_fault() {
        let (status, body) = call(app(test_config()), "/panic").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 500);
        assert_eq!(body["message"], "boom");
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let response = app(dev_config())
            .oneshot(Request::builder().uri("/fine").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn unmatched_route_uses_plain_envelope() {
        let (status, body) = call(app(dev_config()), "/nowhere").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Not Found" }));
    }
}
