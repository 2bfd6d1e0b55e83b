use ticklist_model::view::{
  DetailView,
  EditorForm,
  TaskEditor
};
use ticklist_model::{
  Action,
  InputRequest
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::TagPillView;

#[derive(Properties, PartialEq)]
pub struct DetailsProps {
  pub detail:     DetailView,
  pub on_action:  Callback<Action>,
  pub on_request:
    Callback<InputRequest>
}

#[function_component(Details)]
pub fn details(
  props: &DetailsProps
) -> Html {
  let body = match &props.detail {
    | DetailView::Placeholder(text) => {
      html! {
          <div class="detail-placeholder">{ *text }</div>
      }
    }
    | DetailView::Editor(editor) => {
      html! {
          <EditorPanel
              key={editor.task_id.clone()}
              editor={editor.clone()}
              on_action={props.on_action.clone()}
              on_request={props.on_request.clone()}
          />
      }
    }
  };

  html! {
      <aside class="panel detail">{ body }</aside>
  }
}

#[derive(Properties, PartialEq)]
struct EditorPanelProps {
  editor:     TaskEditor,
  on_action:  Callback<Action>,
  on_request: Callback<InputRequest>
}

#[function_component(EditorPanel)]
fn editor_panel(
  props: &EditorPanelProps
) -> Html {
  let form =
    use_state(|| props.editor.form());

  {
    let form = form.clone();
    use_effect_with(
      props.editor.clone(),
      move |editor| {
        form.set(editor.form());
        || ()
      }
    );
  }

  let edit =
    |apply: fn(&mut EditorForm, String)| {
      let form = form.clone();
      move |value: String| {
        let mut next = (*form).clone();
        apply(&mut next, value);
        form.set(next);
      }
    };

  let on_title = {
    let set =
      edit(|form, value| form.title = value);
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        set(input.value());
      }
    )
  };
  let on_description = {
    let set = edit(|form, value| {
      form.description = value
    });
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        set(input.value());
      }
    )
  };
  let on_list = {
    let set = edit(|form, value| {
      form.list_id = value
    });
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        set(select.value());
      }
    )
  };
  let on_due = {
    let set = edit(|form, value| {
      form.due_date = value
    });
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        set(input.value());
      }
    )
  };

  let emit = |action: Action| {
    let on_action =
      props.on_action.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_action.emit(action.clone())
      }
    )
  };

  let editor = &props.editor;
  let on_save = {
    let on_action =
      props.on_action.clone();
    let form = form.clone();
    let editor = editor.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_action.emit(
          editor
            .save_action((*form).clone())
        );
      }
    )
  };
  let on_add_subtask = {
    let on_request =
      props.on_request.clone();
    let request =
      editor.add_subtask_request();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_request.emit(request.clone())
      }
    )
  };

  html! {
      <div class="detail-content">
          <h2>{ "Task:" }</h2>
          <div class="detail-field">
              <input type="text" value={form.title.clone()} oninput={on_title} />
          </div>
          <div class="detail-field">
              <textarea
                  placeholder="Description"
                  value={form.description.clone()}
                  oninput={on_description}
              />
          </div>
          <div class="detail-row">
              <label>{ "List" }</label>
              <select onchange={on_list}>
                  {
                      for editor.list_options.iter().map(|option| html! {
                          <option value={option.id.clone()} selected={form.list_id == option.id}>
                              { &option.name }
                          </option>
                      })
                  }
              </select>
          </div>
          <div class="detail-row">
              <label>{ "Due date" }</label>
              <input type="date" value={form.due_date.clone()} oninput={on_due} />
          </div>
          <div class="detail-row">
              <label>{ "Tags" }</label>
              <div class="detail-tags">
                  {
                      for editor.tags.iter().cloned().map(|pill| html! {
                          <TagPillView pill={pill} />
                      })
                  }
                  {
                      match editor.add_tag_action() {
                          | Some(action) => html! {
                              <button class="tag-pill add-tag-pill" onclick={emit(action)}>{ "+ Add Tag" }</button>
                          },
                          | None => html! {}
                      }
                  }
              </div>
          </div>
          <div class="subtask-section">
              <h3>{ "Subtasks:" }</h3>
              <button class="add-subtask-btn" onclick={on_add_subtask}>{ "+ Add New Subtask" }</button>
              {
                  for editor.subtasks.iter().map(|subtask| html! {
                      <div class={if subtask.done { "subtask-item done" } else { "subtask-item" }}>
                          <input
                              type="checkbox"
                              checked={subtask.done}
                              onclick={emit(subtask.toggle_action.clone())}
                          />
                          <span>{ &subtask.text }</span>
                      </div>
                  })
              }
          </div>
          <div class="detail-actions">
              <button class="btn-delete" onclick={emit(editor.delete_action())}>{ "Delete Task" }</button>
              <button class="btn-save" onclick={on_save}>{ "Save changes" }</button>
          </div>
      </div>
  }
}
