use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::epoch_millis_serde;

/// A single to-do item. Field names on the wire follow the browser
/// record shape (`id`, `text`, `completed`, `createdAt`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(with = "epoch_millis_serde")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds an active task. `created_at` is truncated to whole
    /// milliseconds, the precision of the persisted record.
    pub fn new_active(id: String, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: now.trunc_subsecs(3),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::Task;

    #[test]
    fn serializes_browser_record_shape() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let task = Task::new_active("abc".to_string(), "Buy groceries".to_string(), now);

        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["text"], "Buy groceries");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], now.timestamp_millis());
    }

    #[test]
    fn toggled_only_flips_completion() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let task = Task::new_active("abc".to_string(), "X".to_string(), now);
        let done = task.toggled();

        assert!(done.completed);
        assert_eq!(done.id, task.id);
        assert_eq!(done.text, task.text);
        assert_eq!(done.created_at, task.created_at);
        assert_eq!(done.toggled(), task);
    }
}
