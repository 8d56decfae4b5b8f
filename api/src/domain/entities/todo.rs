//! Todo domain entity
//!
//! A short textual task with a completion flag.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TodoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A todo as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Data for creating a new todo (already validated and trimmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
}

impl NewTodo {
    /// Build the stored record. New todos always start incomplete.
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: false,
        }
    }
}

/// Partial update: only the supplied fields change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    /// Merge the supplied fields over an existing todo
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(),
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn todo_id_display_is_hyphenated_uuid() {
        let id = TodoId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn todo_ids_are_unique() {
        let a = TodoId::new();
        let b = TodoId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn todo_serializes_id_as_plain_string() {
        let todo = Todo {
            id: TodoId(Uuid::nil()),
            title: "Test".to_string(),
            completed: false,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn new_todo_starts_incomplete() {
        let id = TodoId::new();
        let todo = NewTodo {
            title: "Buy milk".to_string(),
        }
        .into_todo(id);

        assert_eq!(todo.id, id);
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
    }

    #[test]
    fn apply_completed_only_keeps_title() {
        let mut item = todo("Walk dog", false);
        TodoChanges {
            completed: Some(true),
            ..Default::default()
        }
        .apply(&mut item);

        assert_eq!(item.title, "Walk dog");
        assert!(item.completed);
    }

    #[test]
    fn apply_title_only_keeps_completed() {
        let mut item = todo("Walk dog", true);
        TodoChanges {
            title: Some("Walk cat".to_string()),
            ..Default::default()
        }
        .apply(&mut item);

        assert_eq!(item.title, "Walk cat");
        assert!(item.completed);
    }

    #[test]
    fn empty_changes_leave_todo_untouched() {
        let mut item = todo("Walk dog", false);
        let before = item.clone();
        TodoChanges::default().apply(&mut item);
        assert_eq!(item, before);
    }
}
