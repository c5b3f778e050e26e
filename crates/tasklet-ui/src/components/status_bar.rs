use tasklet_core::items_left_label;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatusBarProps {
  pub active_count:       usize,
  pub completed_count:    usize,
  pub on_clear_completed:
    Callback<MouseEvent>
}

#[function_component(StatusBar)]
pub fn status_bar(
  props: &StatusBarProps
) -> Html {
  html! {
      <div class="status-bar">
          <span class="count" data-testid="active-count">
              { items_left_label(props.active_count) }
          </span>
          <span class="count" data-testid="completed-count">
              { format!("{} completed", props.completed_count) }
          </span>
          {
              if props.completed_count > 0 {
                  html! {
                      <button
                          class="btn danger"
                          data-testid="clear-completed"
                          onclick={props.on_clear_completed.clone()}
                      >
                          { "Clear completed" }
                      </button>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
