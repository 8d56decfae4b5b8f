//! In-memory implementation of TodoRepository

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::entities::{Todo, TodoChanges, TodoId};
use crate::domain::ports::TodoRepository;
use crate::error::DomainError;

/// Ordered in-memory todo store
///
/// The lock is held for exactly one operation and never across an await,
/// so every call is atomic with respect to concurrent requests.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with todos (insertion order is kept)
    #[cfg(test)]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: RwLock::new(todos),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Todo>>, DomainError> {
        self.todos
            .read()
            .map_err(|e| DomainError::Storage(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Todo>>, DomainError> {
        self.todos
            .write()
            .map_err(|e| DomainError::Storage(e.to_string()))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, DomainError> {
        Ok(self.read()?.iter().find(|t| t.id == *id).cloned())
    }

    async fn save(&self, todo: &Todo) -> Result<(), DomainError> {
        self.write()?.push(todo.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.write()?;
        Ok(todos.iter_mut().find(|t| t.id == *id).map(|todo| {
            changes.apply(todo);
            todo.clone()
        }))
    }

    async fn remove(&self, id: &TodoId) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.write()?;
        Ok(todos
            .iter()
            .position(|t| t.id == *id)
            .map(|index| todos.remove(index)))
    }

    async fn remove_all(&self) -> Result<Vec<Todo>, DomainError> {
        Ok(std::mem::take(&mut *self.write()?))
    }
}
