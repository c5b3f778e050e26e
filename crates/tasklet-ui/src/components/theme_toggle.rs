use tasklet_core::Theme;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  pub theme:     Theme,
  pub on_toggle: Callback<MouseEvent>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  html! {
      <button
          class="btn"
          data-testid="theme-toggle"
          data-theme-current={props.theme.as_str()}
          onclick={props.on_toggle.clone()}
      >
          { props.theme.toggle_label() }
      </button>
  }
}
