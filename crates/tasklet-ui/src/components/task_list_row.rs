use tasklet_core::Task;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      Task,
  pub on_toggle: Callback<String>,
  pub on_delete: Callback<String>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id.clone();
  let completed = props.task.completed;

  let onchange = {
    let on_toggle =
      props.on_toggle.clone();
    let id = id.clone();
    Callback::from(
      move |_: web_sys::Event| {
        on_toggle.emit(id.clone())
      }
    )
  };

  let onclick = {
    let on_delete =
      props.on_delete.clone();
    let id = id.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_delete.emit(id.clone())
      }
    )
  };

  html! {
      <li
          class={classes!("row", completed.then_some("done"))}
          data-testid="task-item"
          data-task-id={id}
      >
          <input
              type="checkbox"
              data-testid="task-checkbox"
              checked={completed}
              {onchange}
          />
          <span class="task-text" data-testid="task-text">{ &props.task.text }</span>
          <button
              class="btn danger"
              data-testid="task-delete"
              aria-label="Delete task"
              {onclick}
          >
              { "Delete" }
          </button>
      </li>
  }
}
