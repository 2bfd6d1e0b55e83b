use ticklist_model::{
  Action,
  AppState,
  InputRequest,
  Theme,
  commands,
  filter,
  storage,
  view
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::components::{
  Details,
  InputPrompt,
  Sidebar,
  TaskList
};
use crate::local_store::LocalStore;

fn apply_theme_attribute(theme: Theme) {
  let Some(root) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.document_element()
    })
  else {
    tracing::warn!(
      "no document element for theme"
    );
    return;
  };

  if let Err(err) = root.set_attribute(
    "data-theme",
    theme.as_attribute()
  ) {
    tracing::warn!(
      error = ?err,
      "failed to apply theme attribute"
    );
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let state = use_state(|| {
    storage::load(&LocalStore)
  });
  let theme = use_state(|| {
    storage::load_theme(&LocalStore)
  });
  let search = use_state(String::new);
  let pending =
    use_state(|| None::<InputRequest>);

  {
    use_effect_with(
      *theme,
      move |theme| {
        apply_theme_attribute(*theme);
        tracing::debug!(
          theme = theme.storage_value(),
          "applied theme"
        );
        || ()
      }
    );
  }

  let dispatch = {
    let state = state.clone();
    Callback::from(
      move |action: Action| {
        let name = action.name();
        let mut next: AppState =
          (*state).clone();
        let outcome = commands::apply(
          &mut next,
          action,
          filter::current_date()
        );
        if !outcome.is_changed() {
          return;
        }

        match storage::save(
          &mut LocalStore,
          &next
        ) {
          | Ok(()) => state.set(next),
          | Err(err) => {
            tracing::error!(
              action = name,
              error = %err,
              "failed to persist state; \
               change dropped"
            );
          }
        }
      }
    )
  };

  let on_request = {
    let pending = pending.clone();
    Callback::from(
      move |request: InputRequest| {
        pending.set(Some(request));
      }
    )
  };

  let on_prompt_submit = {
    let pending = pending.clone();
    let dispatch = dispatch.clone();
    Callback::from(
      move |text: String| {
        if let Some(action) = (*pending)
          .as_ref()
          .and_then(|request| {
            request.respond(&text)
          })
        {
          dispatch.emit(action);
        }
        pending.set(None);
      }
    )
  };

  let on_prompt_cancel = {
    let pending = pending.clone();
    Callback::from(move |(): ()| {
      pending.set(None)
    })
  };

  let on_search = {
    let search = search.clone();
    Callback::from(
      move |text: String| {
        search.set(text)
      }
    )
  };

  let on_toggle_theme = {
    let theme = theme.clone();
    Callback::from(move |(): ()| {
      let next = (*theme).toggle();
      if let Err(err) =
        storage::save_theme(
          &mut LocalStore,
          next
        )
      {
        tracing::error!(
          error = %err,
          "failed to persist theme"
        );
        return;
      }
      theme.set(next);
    })
  };

  let model =
    view::render(
      &state,
      &search,
      filter::current_date()
    );

  html! {
      <div class="app">
          <Sidebar
              sidebar={model.sidebar}
              theme={*theme}
              on_action={dispatch.clone()}
              on_request={on_request.clone()}
              on_toggle_theme={on_toggle_theme}
          />
          <TaskList
              view={model.task_list}
              search={(*search).clone()}
              on_search={on_search}
              on_action={dispatch.clone()}
              on_request={on_request.clone()}
          />
          <Details
              detail={model.detail}
              on_action={dispatch}
              on_request={on_request}
          />
          {
              match (*pending).clone() {
                  | Some(request) => html! {
                      <InputPrompt
                          request={request}
                          on_submit={on_prompt_submit}
                          on_cancel={on_prompt_cancel}
                      />
                  },
                  | None => html! {}
              }
          }
      </div>
  }
}
