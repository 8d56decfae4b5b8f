//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod todos;

pub use todos::{create_todo, delete_all_todos, delete_todo, get_todo, list_todos, update_todo};
