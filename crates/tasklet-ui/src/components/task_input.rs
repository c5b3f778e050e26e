use yew::{
  Callback,
  Html,
  InputEvent,
  KeyboardEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskInputProps {
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

#[function_component(TaskInput)]
pub fn task_input(
  props: &TaskInputProps
) -> Html {
  let oninput = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  let onkeydown = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          e.prevent_default();
          on_submit.emit(());
        }
      }
    )
  };

  let onclick = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_submit.emit(())
      }
    )
  };

  html! {
      <div class="new-task">
          <input
              class="input"
              type="text"
              data-testid="task-input"
              placeholder="What needs to be done?"
              value={props.value.clone()}
              {oninput}
              {onkeydown}
          />
          <button class="btn ok" data-testid="task-add" {onclick}>{ "Add" }</button>
      </div>
  }
}
