use ticklist_model::view::SidebarView;
use ticklist_model::{
  Action,
  InputRequest,
  Theme
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TagPillView;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub sidebar:         SidebarView,
  pub theme:           Theme,
  pub on_action:       Callback<Action>,
  pub on_request:
    Callback<InputRequest>,
  pub on_toggle_theme: Callback<()>
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  let nav_item = |label: &str,
                  count: usize,
                  active: bool,
                  action: Action| {
    let class = if active {
      "nav-item active"
    } else {
      "nav-item"
    };
    let on_action =
      props.on_action.clone();
    let label = label.to_string();
    html! {
        <button class={class} onclick={move |_| on_action.emit(action.clone())}>
            { label }
            <span class="nav-count">{ count.to_string() }</span>
        </button>
    }
  };

  let open_prompt = |request: InputRequest| {
    let on_request =
      props.on_request.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_request.emit(request.clone())
      }
    )
  };

  let on_toggle_theme =
    props.on_toggle_theme.clone();
  let sidebar = &props.sidebar;

  html! {
      <aside class="sidebar">
          <div class="header">{ "Tasks" }</div>
          { nav_item("Today", sidebar.today_count, sidebar.today_active, SidebarView::today_action()) }
          { nav_item("Upcoming", sidebar.upcoming_count, sidebar.upcoming_active, SidebarView::upcoming_action()) }

          <div class="header">{ "Lists" }</div>
          {
              for sidebar.lists.iter().map(|entry| {
                  let class = if entry.active { "nav-item active" } else { "nav-item" };
                  let on_action = props.on_action.clone();
                  let action = entry.action.clone();
                  html! {
                      <button class={class} onclick={move |_| on_action.emit(action.clone())}>
                          <span class="list-dot" style={format!("background:{}", entry.color)}></span>
                          { &entry.name }
                          <span class="nav-count">{ entry.count.to_string() }</span>
                      </button>
                  }
              })
          }
          <button class="btn" onclick={open_prompt(InputRequest::ListName)}>{ "+ Add New List" }</button>

          <div class="header">{ "Tags" }</div>
          <div class="tags">
              {
                  for sidebar.tags.iter().cloned().map(|pill| html! {
                      <TagPillView pill={pill} />
                  })
              }
              <button class="tag-pill add-tag-pill" onclick={open_prompt(InputRequest::TagName)}>{ "+ Add Tag" }</button>
          </div>

          <button class="btn theme-btn" onclick={move |_: yew::MouseEvent| on_toggle_theme.emit(())}>
              { props.theme.toggle_label() }
          </button>
      </aside>
  }
}
