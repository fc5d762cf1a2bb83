//! Task entity and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A persisted task as exchanged over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier. Never reused.
    pub id: String,

    /// Trimmed, non-empty task text.
    pub text: String,

    /// Completion flag.
    pub completed: bool,

    /// Creation time; the list sort key.
    pub created_at: DateTime<Utc>,
}

/// Payload of a create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    /// Required. Missing text is reported by validation, not by the decoder,
    /// so the caller gets the validator's message.
    #[serde(default)]
    pub text: Option<String>,

    /// Defaults to `false` when omitted.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl NewTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Payload of an update request.
///
/// Only fields that are `Some` are applied. `{"completed": false}` therefore
/// clears the flag, while `{}` leaves the task untouched. An explicit `null`
/// is a decode error rather than an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(
        default,
        deserialize_with = "supplied",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,

    #[serde(
        default,
        deserialize_with = "supplied",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<bool>,
}

/// Decode a field that is present in the body; `null` fails like any other
/// wrong type.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }

    /// Apply the supplied fields to `task`. `id` and `created_at` are never touched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: "t1".into(),
            text: "Buy milk".into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_task_json_shape() {
        let task = sample();
        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["id"], "t1");
        assert_eq!(obj["text"], "Buy milk");
        assert_eq!(obj["completed"], false);
        assert!(obj["createdAt"].is_string());

        let decoded: Task = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_patch_distinguishes_false_from_absent() {
        let absent: TaskPatch = serde_json::from_str("{}").unwrap();
        assert!(absent.is_empty());

        let explicit: TaskPatch = serde_json::from_str(r#"{"completed": false}"#).unwrap();
        assert_eq!(explicit.completed, Some(false));

        let mut task = sample();
        task.completed = true;
        explicit.apply_to(&mut task);
        assert!(!task.completed);
        assert_eq!(task.text, "Buy milk");
    }

    #[test]
    fn test_patch_rejects_explicit_null() {
        assert!(serde_json::from_str::<TaskPatch>(r#"{"completed": null}"#).is_err());
        assert!(serde_json::from_str::<TaskPatch>(r#"{"text": null}"#).is_err());

        let text: TaskPatch = serde_json::from_str(r#"{"text": "Buy milk"}"#).unwrap();
        assert_eq!(text, TaskPatch::text("Buy milk"));
    }

    #[test]
    fn test_patch_text_only_keeps_flag() {
        let mut task = sample();
        task.completed = true;
        TaskPatch::text("Buy oat milk").apply_to(&mut task);

        assert_eq!(task.text, "Buy oat milk");
        assert!(task.completed);
    }

    #[test]
    fn test_new_task_defaults() {
        let new: NewTask = serde_json::from_str(r#"{"text": "Clean house"}"#).unwrap();
        assert_eq!(new.text.as_deref(), Some("Clean house"));
        assert_eq!(new.completed, None);

        let missing: NewTask = serde_json::from_str("{}").unwrap();
        assert!(missing.text.is_none());
    }
}
