use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Status assigned to newly created tasks. Statuses are otherwise opaque
/// strings chosen by clients; the store never interprets them.
pub const DEFAULT_STATUS: &str = "todo";

/// A task as stored: id, owner and content. Ownership is immutable after
/// creation; updates rewrite text and status only.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRecord {
    pub id: Uuid,
    pub user_id: i32,
    pub text: String,
    pub status: String,
}

/// The wire view of a task: exactly `{id, text, status}`. The owner is
/// implied by the list it came from and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub status: String,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            status: record.status,
        }
    }
}

/// Query parameters for listing tasks. The username is the caller's
/// per-call credential; there is no session token.
#[derive(Debug, Deserialize, Validate)]
pub struct ListTasksQuery {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
}

/// Payload for creating a task. The text may be empty; the field itself
/// must be present.
#[derive(Debug, Deserialize, Validate)]
pub struct NewTaskRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    pub text: String,
}

/// Payload for updating a task: overwrites text and status.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    pub text: String,
    pub status: String,
}

/// Payload for sharing a task. The `toUsername` key is the established
/// wire format.
#[derive(Debug, Deserialize, Validate)]
pub struct ShareTaskRequest {
    #[serde(rename = "toUsername")]
    #[validate(length(min = 1, message = "toUsername must not be empty"))]
    pub to_username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_wire_shape() {
        let record = TaskRecord {
            id: Uuid::new_v4(),
            user_id: 3,
            text: "water the plants".to_string(),
            status: "todo".to_string(),
        };

        let json = serde_json::to_value(Task::from(record)).unwrap();
        assert_eq!(json["text"], "water the plants");
        assert_eq!(json["status"], "todo");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_new_task_allows_empty_text() {
        let input = NewTaskRequest {
            username: "alice".to_string(),
            text: String::new(),
        };
        assert!(input.validate().is_ok());

        let missing_username = NewTaskRequest {
            username: String::new(),
            text: "x".to_string(),
        };
        assert!(missing_username.validate().is_err());
    }

    #[test]
    fn test_share_request_wire_key() {
        let parsed: ShareTaskRequest =
            serde_json::from_value(serde_json::json!({ "toUsername": "bob" })).unwrap();
        assert_eq!(parsed.to_username, "bob");
        assert!(parsed.validate().is_ok());

        let empty: ShareTaskRequest =
            serde_json::from_value(serde_json::json!({ "toUsername": "" })).unwrap();
        assert!(empty.validate().is_err());
    }
}
