use tracing::{debug, info};

use crate::collection::TaskCollection;
use crate::filter::{self, FilterMode};
use crate::store::{KeyValueStore, TaskStore};
use crate::task::Task;
use crate::theme::Theme;

/// Everything a front end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub visible: Vec<Task>,
    pub active_count: usize,
    pub completed_count: usize,
    pub total: usize,
    pub theme: Theme,
    pub filter: FilterMode,
}

type Observer = Box<dyn FnMut(&SessionView)>;

/// Owns the current snapshot, theme and filter for one front end.
///
/// Each intent replaces the snapshot first, then writes the changed record
/// through to the store, then notifies subscribers. No-op intents touch
/// neither the store nor the subscribers.
pub struct Session<S> {
    store: TaskStore<S>,
    tasks: TaskCollection,
    theme: Theme,
    filter: FilterMode,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> Session<S> {
    #[tracing::instrument(skip(store))]
    pub fn open(store: TaskStore<S>) -> Self {
        let tasks = store.load_tasks();
        let theme = store.load_theme();
        info!(tasks = tasks.len(), theme = %theme, "opened session");
        Self {
            store,
            tasks,
            theme,
            filter: FilterMode::default(),
            observers: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            visible: filter::visible(&self.tasks, self.filter),
            active_count: filter::active_count(&self.tasks),
            completed_count: filter::completed_count(&self.tasks),
            total: self.tasks.len(),
            theme: self.theme,
            filter: self.filter,
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&SessionView) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn add(&mut self, raw_text: &str) -> bool {
        let next = self.tasks.add(raw_text);
        self.replace_tasks(next, "add")
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        let next = self.tasks.toggle(id);
        self.replace_tasks(next, "toggle")
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let next = self.tasks.delete(id);
        self.replace_tasks(next, "delete")
    }

    pub fn clear_completed(&mut self) -> bool {
        let next = self.tasks.clear_completed();
        self.replace_tasks(next, "clear_completed")
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.set_theme(self.theme.toggle())
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        self.store.save_theme(theme);
        debug!(theme = %theme, "theme changed");
        self.notify();
        true
    }

    pub fn set_filter(&mut self, mode: FilterMode) -> bool {
        if mode == self.filter {
            return false;
        }
        self.filter = mode;
        debug!(filter = %mode, "filter changed");
        self.notify();
        true
    }

    fn replace_tasks(&mut self, next: TaskCollection, op: &'static str) -> bool {
        if next.same_snapshot(&self.tasks) {
            debug!(op, "no change");
            return false;
        }
        self.tasks = next;
        self.store.save_tasks(&self.tasks);
        debug!(op, count = self.tasks.len(), "tasks changed");
        self.notify();
        true
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer(&view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Session, SessionView};
    use crate::filter::FilterMode;
    use crate::store::{KeyValueStore, MemoryStore, StorageKeys, TaskStore};
    use crate::theme::Theme;

    fn open() -> (Session<Rc<MemoryStore>>, Rc<MemoryStore>) {
        let backend = Rc::new(MemoryStore::new());
        let session = Session::open(TaskStore::new(Rc::clone(&backend)));
        (session, backend)
    }

    #[test]
    fn writes_through_after_each_change() {
        let (mut session, backend) = open();
        let keys = StorageKeys::default();

        assert!(session.add("Buy groceries"));
        let stored = backend.get_item(&keys.tasks).unwrap().unwrap();
        assert!(stored.contains("Buy groceries"));

        let reopened = Session::open(TaskStore::new(Rc::clone(&backend)));
        assert_eq!(reopened.tasks(), session.tasks());
    }

    #[test]
    fn noops_skip_store_and_observers() {
        let (mut session, backend) = open();
        let seen = Rc::new(RefCell::new(0_usize));
        let counter = Rc::clone(&seen);
        session.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(!session.add("   "));
        assert!(!session.toggle("missing"));
        assert!(!session.delete("missing"));
        assert!(!session.clear_completed());
        assert!(!session.set_filter(FilterMode::All));
        assert!(!session.set_theme(Theme::Light));

        assert_eq!(*seen.borrow(), 0);
        assert!(backend.is_empty());
    }

    #[test]
    fn observers_see_recomputed_view() {
        let (mut session, _backend) = open();
        let views: Rc<RefCell<Vec<SessionView>>> = Rc::default();
        let sink = Rc::clone(&views);
        session.subscribe(move |view| sink.borrow_mut().push(view.clone()));

        session.add("X");
        let id = session.tasks().as_slice()[0].id.clone();
        session.toggle(&id);
        session.set_filter(FilterMode::Active);
        session.clear_completed();

        let views = views.borrow();
        assert_eq!(views.len(), 4);
        assert_eq!((views[0].active_count, views[0].completed_count), (1, 0));
        assert_eq!((views[1].active_count, views[1].completed_count), (0, 1));
        assert!(views[2].visible.is_empty());
        assert_eq!(views[2].filter, FilterMode::Active);
        assert_eq!(views[3].total, 0);
    }

    #[test]
    fn theme_changes_persist_and_filter_does_not() {
        let (mut session, backend) = open();
        let keys = StorageKeys::default();

        assert!(session.toggle_theme());
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(backend.get_item(&keys.theme).unwrap().as_deref(), Some("dark"));

        session.set_filter(FilterMode::Completed);
        let reopened = Session::open(TaskStore::new(Rc::clone(&backend)));
        assert_eq!(reopened.theme(), Theme::Dark);
        assert_eq!(reopened.filter(), FilterMode::All);
        assert_eq!(backend.len(), 1);
    }
}
