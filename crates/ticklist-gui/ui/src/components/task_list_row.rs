use ticklist_model::Action;
use ticklist_model::view::{
  Badge,
  TaskRow
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       TaskRow,
  pub on_action: Callback<Action>
}

fn badge_html(badge: &Badge) -> Html {
  match badge {
    | Badge::Due(_) => html! {
        <span class="meta-badge">{ format!("📅 {}", badge.label()) }</span>
    },
    | Badge::Subtasks(_) => html! {
        <span class="meta-badge">{ badge.label() }</span>
    },
    | Badge::List { color, .. } => {
      html! {
          <span class="meta-badge">
              <span class="dot" style={format!("background:{color}")}></span>
              { badge.label() }
          </span>
      }
    }
  }
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let row = &props.row;
  let mut class =
    vec!["task-row"];
  if row.completed {
    class.push("completed");
  }
  if row.selected {
    class.push("selected");
  }

  let on_select = {
    let on_action =
      props.on_action.clone();
    let action =
      row.select_action.clone();
    move |_: yew::MouseEvent| {
      on_action.emit(action.clone())
    }
  };
  let on_toggle = {
    let on_action =
      props.on_action.clone();
    let action =
      row.toggle_action.clone();
    move |e: yew::MouseEvent| {
      e.stop_propagation();
      on_action.emit(action.clone());
    }
  };

  html! {
      <div class={class.join(" ")} onclick={on_select}>
          <input type="checkbox" checked={row.completed} onclick={on_toggle} />
          <div class="task-info">
              <div class="task-title">{ &row.title }</div>
              {
                  if row.badges.is_empty() {
                      html! {}
                  } else {
                      html! {
                          <div class="task-meta">
                              { for row.badges.iter().map(badge_html) }
                          </div>
                      }
                  }
              }
          </div>
          <span class="chevron">{ "›" }</span>
      </div>
  }
}
