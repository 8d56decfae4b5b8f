//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod todo;

pub use todo::{NewTodo, Todo, TodoChanges, TodoId};
