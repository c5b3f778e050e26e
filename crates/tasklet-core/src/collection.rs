use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::id::generate_id;
use crate::task::Task;

/// Ordered task snapshot, newest first.
///
/// A collection is never edited in place: every operation returns a new
/// snapshot. Operations that change nothing hand back the same shared
/// buffer, so [`TaskCollection::same_snapshot`] is a cheap change check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Arc<Vec<Task>>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from records of unknown origin. Text is trimmed,
    /// then blank tasks and tasks repeating an earlier id are dropped so ids
    /// stay pairwise distinct.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let before = tasks.len();
        let mut seen = HashSet::with_capacity(before);
        let kept: Vec<Task> = tasks
            .into_iter()
            .map(|mut task| {
                let trimmed = task.text.trim();
                if trimmed.len() != task.text.len() {
                    task.text = trimmed.to_string();
                }
                task
            })
            .filter(|task| {
                if task.text.trim().is_empty() {
                    warn!(id = %task.id, "dropping task with blank text");
                    return false;
                }
                if !seen.insert(task.id.clone()) {
                    warn!(id = %task.id, "dropping task with duplicate id");
                    return false;
                }
                true
            })
            .collect();

        if kept.len() != before {
            debug!(before, after = kept.len(), "sanitized task collection");
        }

        Self {
            tasks: Arc::new(kept),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// True when both values share the same underlying snapshot.
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tasks, &other.tasks)
    }

    pub fn add(&self, raw_text: &str) -> Self {
        self.add_at(raw_text, Utc::now())
    }

    /// Prepends a new active task. Blank input is a no-op.
    pub fn add_at(&self, raw_text: &str, now: DateTime<Utc>) -> Self {
        let text = raw_text.trim();
        if text.is_empty() {
            return self.clone();
        }

        let mut id = generate_id(now);
        while self.contains(&id) {
            id = generate_id(now);
        }

        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(Task::new_active(id, text.to_string(), now));
        tasks.extend(self.tasks.iter().cloned());
        Self {
            tasks: Arc::new(tasks),
        }
    }

    /// Flips `completed` on the matching task. Unknown ids are a no-op.
    pub fn toggle(&self, id: &str) -> Self {
        if !self.contains(id) {
            return self.clone();
        }

        let tasks = self
            .tasks
            .iter()
            .map(|task| if task.id == id { task.toggled() } else { task.clone() })
            .collect();
        Self {
            tasks: Arc::new(tasks),
        }
    }

    pub fn delete(&self, id: &str) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        self.retain(|task| task.id != id)
    }

    pub fn clear_completed(&self) -> Self {
        if self.tasks.iter().all(Task::is_active) {
            return self.clone();
        }
        self.retain(Task::is_active)
    }

    fn retain<F>(&self, keep: F) -> Self
    where
        F: Fn(&Task) -> bool,
    {
        let tasks = self.tasks.iter().filter(|task| keep(task)).cloned().collect();
        Self {
            tasks: Arc::new(tasks),
        }
    }
}

impl<'de> Deserialize<'de> for TaskCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Task>::deserialize(deserializer).map(Self::from_tasks)
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
