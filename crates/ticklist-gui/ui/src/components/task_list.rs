use ticklist_model::view::TaskListView;
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
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:       TaskListView,
  pub search:     String,
  pub on_search:  Callback<String>,
  pub on_action:  Callback<Action>,
  pub on_request:
    Callback<InputRequest>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let on_input = {
    let on_search =
      props.on_search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_search.emit(input.value());
      }
    )
  };
  let on_add = {
    let on_request =
      props.on_request.clone();
    move |_: yew::MouseEvent| {
      on_request
        .emit(InputRequest::TaskTitle)
    }
  };

  html! {
      <main class="panel list">
          <div class="header">
              <h1>{ &props.view.title }</h1>
              <span class="task-count-badge">{ props.view.count.to_string() }</span>
          </div>
          <input
              class="search"
              value={props.search.clone()}
              placeholder="Search"
              oninput={on_input}
          />
          <button class="btn add-task" onclick={on_add}>{ "+ Add New Task" }</button>
          {
              for props.view.rows.iter().cloned().map(|row| html! {
                  <TaskListRow
                      key={row.id.clone()}
                      row={row.clone()}
                      on_action={props.on_action.clone()}
                  />
              })
          }
          {
              match props.view.empty_message {
                  | Some(message) => html! { <div class="empty-msg">{ message }</div> },
                  | None => html! {}
              }
          }
      </main>
  }
}
