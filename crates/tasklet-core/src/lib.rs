pub mod collection;
pub mod datetime;
pub mod filter;
pub mod id;
pub mod session;
pub mod store;
pub mod task;
pub mod theme;

pub use collection::TaskCollection;
pub use filter::{
  FilterMode,
  active_count,
  completed_count,
  items_left_label,
  visible
};
pub use id::generate_id;
pub use session::{
  Session,
  SessionView
};
pub use store::{
  KeyValueStore,
  MemoryStore,
  StorageKeys,
  TaskStore
};
pub use task::Task;
pub use theme::Theme;
