use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::collection::TaskCollection;
use crate::task::Task;

/// Visibility scope for the task list. Never persisted.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum FilterMode {
  #[default]
  All,
  Active,
  Completed
}

impl FilterMode {
  pub const ALL: [FilterMode; 3] = [
    FilterMode::All,
    FilterMode::Active,
    FilterMode::Completed
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Active => "active",
      | Self::Completed => "completed"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::All => "All",
      | Self::Active => "Active",
      | Self::Completed => "Completed"
    }
  }

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | Self::All => true,
      | Self::Active => !task.completed,
      | Self::Completed => task.completed
    }
  }
}

impl fmt::Display for FilterMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for FilterMode {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "all" => Ok(Self::All),
      | "active" => Ok(Self::Active),
      | "completed" => {
        Ok(Self::Completed)
      }
      | other => Err(anyhow!(
        "unknown filter: {other} \
         (expected all, active or \
         completed)"
      ))
    }
  }
}

/// Tasks in scope for `mode`, in collection order.
pub fn visible(
  tasks: &TaskCollection,
  mode: FilterMode
) -> Vec<Task> {
  tasks
    .iter()
    .filter(|task| mode.matches(task))
    .cloned()
    .collect()
}

pub fn active_count(
  tasks: &TaskCollection
) -> usize {
  tasks
    .iter()
    .filter(|task| !task.completed)
    .count()
}

pub fn completed_count(
  tasks: &TaskCollection
) -> usize {
  tasks
    .iter()
    .filter(|task| task.completed)
    .count()
}

/// Footer text for the active counter: `1 item left`, `3 items left`.
pub fn items_left_label(
  count: usize
) -> String {
  if count == 1 {
    "1 item left".to_string()
  } else {
    format!("{count} items left")
  }
}
