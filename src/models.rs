//! Board and Session Models
//!
//! Serialized as camelCase JSON, the shape kept in local storage.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::DEFAULT_USER_ID;

pub type ListId = String;
pub type TaskId = String;

/// Signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Older sessions may have stored `null` here
    #[serde(default = "default_user_id", deserialize_with = "user_id_or_default")]
    pub id: i64,
    pub email: String,
}

fn default_user_id() -> i64 {
    DEFAULT_USER_ID
}

fn user_id_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_USER_ID))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning list; always the one list whose `task_ids` holds this id
    pub list_id: ListId,
    pub completed: bool,
    /// Zero-based rank inside the owning list
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    /// Authoritative ordering of the list's tasks
    pub task_ids: Vec<TaskId>,
}

impl List {
    pub fn new(id: ListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// All lists and tasks of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub lists: HashMap<ListId, List>,
    pub tasks: HashMap<TaskId, Task>,
    /// Column display order (creation order)
    #[serde(default)]
    pub list_order: Vec<ListId>,
}

/// Partial update for `update_task`; `id` and `list_id` are not reachable here
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_json_shape() {
        let task = Task {
            id: "task-1".to_string(),
            title: "Write spec".to_string(),
            description: None,
            list_id: "list-1".to_string(),
            completed: false,
            order: 0,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["listId"], "list-1");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_board_without_list_order_parses() {
        let raw = r#"{"lists":{"l":{"id":"l","title":"Todo","taskIds":[]}},"tasks":{}}"#;
        let board: Board = serde_json::from_str(raw).unwrap();
        assert_eq!(board.lists["l"].title, "Todo");
        assert!(board.list_order.is_empty());
    }

    #[test]
    fn test_user_with_null_id_gets_default() {
        let user: User = serde_json::from_str(r#"{"id":null,"email":"a@example.com"}"#).unwrap();
        assert_eq!(user.id, DEFAULT_USER_ID);

        let user: User = serde_json::from_str(r#"{"email":"b@example.com"}"#).unwrap();
        assert_eq!(user.id, DEFAULT_USER_ID);

        let user: User = serde_json::from_str(r#"{"id":12,"email":"c@example.com"}"#).unwrap();
        assert_eq!(user.id, 12);
    }

    #[test]
    fn test_patch_builder() {
        let patch = TaskPatch::default().title("New").completed(true);
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.completed, Some(true));
        assert!(patch.description.is_none());
        assert!(TaskPatch::default().is_empty());
    }
}
