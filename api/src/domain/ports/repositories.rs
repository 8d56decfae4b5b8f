//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the in-memory store).

use async_trait::async_trait;

use crate::domain::entities::{Todo, TodoChanges, TodoId};
use crate::error::DomainError;

/// Repository for Todo entities
///
/// Lookups return `Ok(None)` when the todo does not exist; `Err` is
/// reserved for storage failures.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos in insertion order
    async fn find_all(&self) -> Result<Vec<Todo>, DomainError>;

    /// Find a todo by ID
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, DomainError>;

    /// Append a fully-formed todo
    async fn save(&self, todo: &Todo) -> Result<(), DomainError>;

    /// Merge the supplied fields over an existing todo and return the result
    async fn update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, DomainError>;

    /// Detach a todo and return it
    async fn remove(&self, id: &TodoId) -> Result<Option<Todo>, DomainError>;

    /// Detach every todo, leaving the store empty
    async fn remove_all(&self) -> Result<Vec<Todo>, DomainError>;
}
