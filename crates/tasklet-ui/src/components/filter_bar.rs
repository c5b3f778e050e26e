use tasklet_core::FilterMode;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub active:    FilterMode,
  pub on_select: Callback<FilterMode>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  html! {
      <div class="filters" role="group">
          {
              for FilterMode::ALL.iter().copied().map(|mode| {
                  let on_select = props.on_select.clone();
                  let selected = props.active == mode;
                  html! {
                      <button
                          class={classes!("btn", "filter", selected.then_some("active"))}
                          data-testid={format!("filter-{}", mode.as_str())}
                          aria-pressed={selected.to_string()}
                          onclick={move |_| on_select.emit(mode)}
                      >
                          { mode.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
