//! Todo service
//!
//! Thin orchestration over the todo repository. Input is validated before it
//! reaches this layer; absence is passed through as `None`.

use std::sync::Arc;

use crate::domain::entities::{NewTodo, Todo, TodoChanges, TodoId};
use crate::domain::ports::TodoRepository;
use crate::error::AppError;

/// Service for managing todos
pub struct TodoService<R>
where
    R: TodoRepository + ?Sized,
{
    todos: Arc<R>,
}

impl<R> TodoService<R>
where
    R: TodoRepository + ?Sized,
{
    pub fn new(todos: Arc<R>) -> Self {
        Self { todos }
    }

    /// All todos in insertion order
    pub async fn get_all(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.todos.find_all().await?)
    }

    /// Find a todo by ID
    pub async fn get_detail(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        Ok(self.todos.find_by_id(id).await?)
    }

    /// Create a todo with a fresh ID, initially incomplete
    pub async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError> {
        let todo = new_todo.into_todo(TodoId::new());
        self.todos.save(&todo).await?;

        tracing::debug!(todo_id = %todo.id, "Created todo");
        Ok(todo)
    }

    /// Apply a partial update
    pub async fn update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, AppError> {
        Ok(self.todos.update(id, changes).await?)
    }

    /// Remove a single todo, returning it if it existed
    pub async fn remove(&self, id: &TodoId) -> Result<Option<Todo>, AppError> {
        Ok(self.todos.remove(id).await?)
    }

    /// Remove every todo, returning what was removed
    pub async fn remove_all(&self) -> Result<Vec<Todo>, AppError> {
        let removed = self.todos.remove_all().await?;

        tracing::debug!(count = removed.len(), "Removed all todos");
        Ok(removed)
    }
}
