use gloo::console::log;
use tasklet_core::{
  TaskCollection,
  TaskStore,
  Theme,
  active_count,
  completed_count,
  visible
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_mut_ref,
  use_reducer,
  use_state
};

use crate::components::{
  FilterBar,
  StatusBar,
  TaskInput,
  TaskList,
  ThemeToggle
};
use crate::model::{
  Intent,
  LastSaved,
  Model,
  persist_tasks,
  sync_theme
};
use crate::storage::{
  LocalStorage,
  apply_root_theme
};

#[function_component(App)]
pub fn app() -> Html {
  let store = use_memo((), |_| {
    TaskStore::new(LocalStorage)
  });
  let model = {
    let store = store.clone();
    use_reducer(move || {
      Model::new(
        store.load_tasks(),
        store.load_theme()
      )
    })
  };
  let draft = use_state(String::new);
  let saved_tasks = use_mut_ref(|| {
    LastSaved::new(model.tasks.clone())
  });
  let saved_theme = use_mut_ref(|| {
    LastSaved::new(model.theme)
  });

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and state \
         loaded"
      );
      || ()
    });
  }

  {
    let store = store.clone();
    let saved_tasks =
      saved_tasks.clone();
    use_effect_with(
      model.tasks.clone(),
      move |tasks: &TaskCollection| {
        persist_tasks(
          &store,
          &mut saved_tasks.borrow_mut(),
          tasks
        );
        || ()
      }
    );
  }

  {
    let store = store.clone();
    let saved_theme =
      saved_theme.clone();
    use_effect_with(
      model.theme,
      move |theme: &Theme| {
        sync_theme(
          &store,
          &mut saved_theme.borrow_mut(),
          *theme,
          apply_root_theme
        );
        || ()
      }
    );
  }

  let on_draft_input = {
    let draft = draft.clone();
    Callback::from(
      move |value: String| {
        draft.set(value)
      }
    )
  };

  let on_submit = {
    let draft = draft.clone();
    let model = model.clone();
    Callback::from(move |_: ()| {
      let text = (*draft).clone();
      if text.trim().is_empty() {
        ui_debug(
          "task.add",
          "ignored blank input"
        );
        return;
      }
      model.dispatch(Intent::Add(text));
      draft.set(String::new());
    })
  };

  let on_toggle = {
    let model = model.clone();
    Callback::from(move |id: String| {
      ui_debug("task.toggle", &id);
      model.dispatch(Intent::Toggle(id));
    })
  };

  let on_delete = {
    let model = model.clone();
    Callback::from(move |id: String| {
      ui_debug("task.delete", &id);
      model.dispatch(Intent::Delete(id));
    })
  };

  let on_select_filter = {
    let model = model.clone();
    Callback::from(move |mode| {
      model
        .dispatch(Intent::SetFilter(mode));
    })
  };

  let on_clear_completed = {
    let model = model.clone();
    Callback::from(
      move |_: MouseEvent| {
        model
          .dispatch(Intent::ClearCompleted);
      }
    )
  };

  let on_toggle_theme = {
    let model = model.clone();
    Callback::from(
      move |_: MouseEvent| {
        model.dispatch(Intent::ToggleTheme);
      }
    )
  };

  let visible_tasks =
    visible(&model.tasks, model.filter);
  let active = active_count(&model.tasks);
  let completed =
    completed_count(&model.tasks);

  html! {
      <div class="app">
          <header class="topbar">
              <h1 class="title">{ "Tasks" }</h1>
              <ThemeToggle theme={model.theme} on_toggle={on_toggle_theme} />
          </header>
          <main class="content">
              <TaskInput
                  value={(*draft).clone()}
                  on_input={on_draft_input}
                  on_submit={on_submit}
              />
              <FilterBar active={model.filter} on_select={on_select_filter} />
              <TaskList
                  tasks={visible_tasks}
                  filter={model.filter}
                  on_toggle={on_toggle}
                  on_delete={on_delete}
              />
              <StatusBar
                  active_count={active}
                  completed_count={completed}
                  on_clear_completed={on_clear_completed}
              />
          </main>
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
