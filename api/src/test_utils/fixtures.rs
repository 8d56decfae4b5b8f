//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::sync::Arc;

use crate::adapters::InMemoryTodoRepository;
use crate::app::TodoService;
use crate::config::{Config, DEVELOPMENT};
use crate::domain::entities::{Todo, TodoId};
use crate::domain::ports::TodoRepository;
use crate::AppState;

/// Create a test todo with default values
pub fn test_todo() -> Todo {
    test_todo_titled("Test todo")
}

/// Create a test todo with a specific title
pub fn test_todo_titled(title: &str) -> Todo {
    Todo {
        id: TodoId::new(),
        title: title.to_string(),
        completed: false,
    }
}

/// Configuration as seen in production (no stack traces in responses)
pub fn test_config() -> Config {
    Config {
        port: 3000,
        environment: "test".to_string(),
        dev_mode: false,
        body_limit: 1024 * 1024,
    }
}

/// Configuration with `APP_ENV=development` set explicitly
pub fn dev_config() -> Config {
    Config {
        environment: DEVELOPMENT.to_string(),
        dev_mode: true,
        ..test_config()
    }
}

/// App state backed by the given repository
pub fn test_state_with(repo: Arc<dyn TodoRepository>, config: Config) -> AppState {
    AppState {
        todo_service: Arc::new(TodoService::new(repo)),
        config,
    }
}

/// App state backed by an empty in-memory store
pub fn test_state() -> AppState {
    test_state_with(Arc::new(InMemoryTodoRepository::new()), test_config())
}
