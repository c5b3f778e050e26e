use tasklet_core::{
  FilterMode,
  Task
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::{
  EmptyState,
  TaskListRow
};

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:     Vec<Task>,
  pub filter:    FilterMode,
  pub on_toggle: Callback<String>,
  pub on_delete: Callback<String>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.tasks.is_empty() {
    return html! {
        <EmptyState filter={props.filter} />
    };
  }

  html! {
      <ul class="panel list" data-testid="task-list">
          {
              for props.tasks.iter().cloned().map(|task| html! {
                  <TaskListRow
                      key={task.id.clone()}
                      task={task.clone()}
                      on_toggle={props.on_toggle.clone()}
                      on_delete={props.on_delete.clone()}
                  />
              })
          }
      </ul>
  }
}
