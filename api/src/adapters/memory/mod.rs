//! In-memory adapters
//!
//! Process-lifetime storage with no persistence across restarts.

mod todo_repo;

pub use todo_repo::InMemoryTodoRepository;
