use tasklet_core::FilterMode;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
  pub filter: FilterMode
}

#[function_component(EmptyState)]
pub fn empty_state(
  props: &EmptyStateProps
) -> Html {
  let message = match props.filter {
    | FilterMode::All => {
      "Nothing to do yet. Add a task above."
    }
    | FilterMode::Active => {
      "No active tasks."
    }
    | FilterMode::Completed => {
      "No completed tasks."
    }
  };

  html! {
      <div class="empty-state" data-testid="empty-state">{ message }</div>
  }
}
