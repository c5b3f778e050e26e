mod empty_state;
mod filter_bar;
mod status_bar;
mod task_input;
mod task_list;
mod task_list_row;
mod theme_toggle;

pub use empty_state::EmptyState;
pub use filter_bar::FilterBar;
pub use status_bar::StatusBar;
pub use task_input::TaskInput;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use theme_toggle::ThemeToggle;
