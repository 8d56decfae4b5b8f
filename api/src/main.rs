//! Todo API Server
//!
//! A minimal CRUD service for short textual tasks.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod fault;
mod handlers;
mod validation;

#[cfg(test)]
mod test_utils;


use adapters::InMemoryTodoRepository;
use app::TodoService;
use config::Config;
use domain::ports::TodoRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub todo_service: Arc<TodoService<dyn TodoRepository>>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    message: &'static str,
    environment: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "API is running",
        environment: state.config.environment.clone(),
    })
}

/// Build the router with every route and layer
fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health).fallback(fault::not_found))
        // Todos
        .route(
            "/todo",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .delete(handlers::delete_all_todos)
                .fallback(fault::not_found),
        )
        .route(
            "/todo/:id",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo)
                .fallback(fault::not_found),
        )
        .fallback(fault::not_found)
        // Middleware (innermost first)
        .layer(CatchPanicLayer::custom(fault::panic_to_fault))
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            fault::fault_handler,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.body_limit))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Todo API...");

    // Load configuration
    let config = Config::from_env();

    // Single store for the lifetime of the process
    let todo_repo: Arc<dyn TodoRepository> = Arc::new(InMemoryTodoRepository::new());
    let todo_service = Arc::new(TodoService::new(todo_repo));

    let state = AppState {
        todo_service,
        config: config.clone(),
    };

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        environment = %config.environment,
        "Listening on http://localhost:{}",
        config.port
    );
    tracing::info!("Health check: http://localhost:{}/", config.port);
    tracing::info!("Todo routes: http://localhost:{}/todo", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
