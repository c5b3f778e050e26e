use std::rc::Rc;

use tasklet_core::{
  FilterMode,
  KeyValueStore,
  TaskCollection,
  TaskStore,
  Theme
};
use yew::Reducible;

/// State owned by the root component. Only [`Intent`]s change it, and
/// each one goes through the pure collection and theme operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
  pub tasks:  TaskCollection,
  pub theme:  Theme,
  pub filter: FilterMode
}

impl Model {
  pub fn new(
    tasks: TaskCollection,
    theme: Theme
  ) -> Self {
    Self {
      tasks,
      theme,
      filter: FilterMode::default()
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
  Add(String),
  Toggle(String),
  Delete(String),
  ClearCompleted,
  SetFilter(FilterMode),
  ToggleTheme
}

impl Reducible for Model {
  type Action = Intent;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let tasks = match &action {
      | Intent::Add(text) => {
        self.tasks.add(text)
      }
      | Intent::Toggle(id) => {
        self.tasks.toggle(id)
      }
      | Intent::Delete(id) => {
        self.tasks.delete(id)
      }
      | Intent::ClearCompleted => {
        self.tasks.clear_completed()
      }
      | Intent::SetFilter(mode) => {
        if *mode == self.filter {
          return self;
        }
        return Rc::new(Self {
          filter: *mode,
          ..(*self).clone()
        });
      }
      | Intent::ToggleTheme => {
        return Rc::new(Self {
          theme: self.theme.toggle(),
          ..(*self).clone()
        });
      }
    };

    if tasks.same_snapshot(&self.tasks)
    {
      tracing::debug!(
        ?action,
        "intent changed nothing"
      );
      return self;
    }

    Rc::new(Self {
      tasks,
      ..(*self).clone()
    })
  }
}

/// Values the effects write through to storage.
pub trait Persisted: Clone {
  fn unchanged_from(
    &self,
    other: &Self
  ) -> bool;
}

impl Persisted for TaskCollection {
  fn unchanged_from(
    &self,
    other: &Self
  ) -> bool {
    self.same_snapshot(other)
  }
}

impl Persisted for Theme {
  fn unchanged_from(
    &self,
    other: &Self
  ) -> bool {
    self == other
  }
}

/// The value most recently written to storage, seeded with what was
/// loaded so startup state is not written back.
#[derive(Debug, Clone)]
pub struct LastSaved<T> {
  value: T
}

impl<T: Persisted> LastSaved<T> {
  pub fn new(loaded: T) -> Self {
    Self { value: loaded }
  }

  pub fn value(&self) -> &T {
    &self.value
  }

  /// Records `next` and returns whether it differs from the last write.
  pub fn advance(
    &mut self,
    next: &T
  ) -> bool {
    if next.unchanged_from(&self.value)
    {
      return false;
    }
    self.value = next.clone();
    true
  }
}

/// Writes `tasks` unless it is the snapshot already saved. Returns
/// whether a write happened.
pub fn persist_tasks<S: KeyValueStore>(
  store: &TaskStore<S>,
  saved: &mut LastSaved<TaskCollection>,
  tasks: &TaskCollection
) -> bool {
  if !saved.advance(tasks) {
    return false;
  }
  store.save_tasks(tasks);
  tracing::debug!(
    count = tasks.len(),
    "persisted tasks"
  );
  true
}

/// Binds the root attribute for every render of `theme`, and writes it
/// only when it differs from the saved value.
pub fn sync_theme<S, F>(
  store: &TaskStore<S>,
  saved: &mut LastSaved<Theme>,
  theme: Theme,
  apply_root: F
) -> bool
where
  S: KeyValueStore,
  F: FnOnce(Theme)
{
  apply_root(theme);
  if !saved.advance(&theme) {
    return false;
  }
  store.save_theme(theme);
  tracing::debug!(
    theme = %theme,
    "persisted theme"
  );
  true
}
