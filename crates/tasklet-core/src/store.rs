use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, error, info};

use crate::collection::TaskCollection;
use crate::theme::Theme;

/// String-keyed durable storage, modelled on the browser `localStorage`
/// API. Every call may fail; callers decide how to degrade.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove_item(key)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub const DEFAULT_KEY_PREFIX: &str = "tasklet";

/// Keys of the two independent persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tasks: String,
    pub theme: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.trim().trim_end_matches('.');
        let prefix = if prefix.is_empty() {
            DEFAULT_KEY_PREFIX
        } else {
            prefix
        };
        Self {
            tasks: format!("{prefix}.tasks"),
            theme: format!("{prefix}.theme"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Persistence adapter for the task collection and the theme.
///
/// Reads always produce a usable value and writes never fail from the
/// caller's point of view; backend errors are logged and dropped.
#[derive(Debug)]
pub struct TaskStore<S> {
    backend: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_keys(backend, StorageKeys::default())
    }

    pub fn with_keys(backend: S, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    #[tracing::instrument(skip(self), fields(key = %self.keys.tasks))]
    pub fn load_tasks(&self) -> TaskCollection {
        let raw = match self.backend.get_item(&self.keys.tasks) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored tasks");
                return TaskCollection::new();
            }
            Err(err) => {
                error!(error = %err, "failed reading tasks from storage");
                return TaskCollection::new();
            }
        };

        match serde_json::from_str::<TaskCollection>(&raw) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(err) => {
                error!(error = %err, "failed parsing tasks from storage");
                TaskCollection::new()
            }
        }
    }

    #[tracing::instrument(skip(self, tasks), fields(key = %self.keys.tasks, count = tasks.len()))]
    pub fn save_tasks(&self, tasks: &TaskCollection) {
        let json = match serde_json::to_string(tasks) {
            Ok(json) => json,
            Err(err) => {
                error!(error = %err, "failed serializing tasks");
                return;
            }
        };

        match self.backend.set_item(&self.keys.tasks, &json) {
            Ok(()) => debug!("saved tasks"),
            Err(err) => {
                error!(error = %err, "failed writing tasks to storage")
            }
        }
    }

    #[tracing::instrument(skip(self), fields(key = %self.keys.theme))]
    pub fn load_theme(&self) -> Theme {
        match self.backend.get_item(&self.keys.theme) {
            Ok(stored) => {
                let theme = Theme::from_storage_value(stored.as_deref());
                if let Some(raw) = stored.as_deref()
                    && raw != theme.as_str()
                {
                    info!(stored = raw, "unrecognised theme value; using default");
                }
                theme
            }
            Err(err) => {
                error!(error = %err, "failed reading theme from storage");
                Theme::default()
            }
        }
    }

    #[tracing::instrument(skip(self), fields(key = %self.keys.theme))]
    pub fn save_theme(&self, theme: Theme) {
        if let Err(err) = self.backend.set_item(&self.keys.theme, theme.as_str()) {
            error!(error = %err, "failed writing theme to storage");
        }
    }
}
