//! Mock implementations of port traits

use async_trait::async_trait;

use crate::domain::entities::{Todo, TodoChanges, TodoId};
use crate::domain::ports::TodoRepository;
use crate::error::DomainError;

/// Repository whose every operation fails with a storage error
pub struct FailingTodoRepository;

fn offline() -> DomainError {
    DomainError::Storage("store offline".to_string())
}

#[async_trait]
impl TodoRepository for FailingTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        Err(offline())
    }

    async fn find_by_id(&self, _id: &TodoId) -> Result<Option<Todo>, DomainError> {
        Err(offline())
    }

    async fn save(&self, _todo: &Todo) -> Result<(), DomainError> {
        Err(offline())
    }

    async fn update(
        &self,
        _id: &TodoId,
        _changes: &TodoChanges,
    ) -> Result<Option<Todo>, DomainError> {
        Err(offline())
    }

    async fn remove(&self, _id: &TodoId) -> Result<Option<Todo>, DomainError> {
        Err(offline())
    }

    async fn remove_all(&self) -> Result<Vec<Todo>, DomainError> {
        Err(offline())
    }
}
