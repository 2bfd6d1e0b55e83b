//! Pure view model of the three panels. Front-ends draw these structs and
//! dispatch the [`Action`]s they carry; they never touch [`AppState`]
//! directly.

use chrono::NaiveDate;

use crate::commands::{
  Action,
  TaskPatch,
  addable_tags
};
use crate::filter;
use crate::input::InputRequest;
use crate::state::{
  AppState,
  tag_color
};
use crate::task::{
  DUE_DATE_FORMAT,
  Task,
  View,
  format_badge_date
};

pub const EMPTY_MESSAGE: &str =
  "No tasks here yet";
pub const DETAIL_PLACEHOLDER: &str =
  "Select a task to view details";
/// Title shown for a list view whose list no longer exists.
pub const FALLBACK_TITLE: &str = "Tasks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
  pub sidebar:   SidebarView,
  pub task_list: TaskListView,
  pub detail:    DetailView
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
  pub today_count:     usize,
  pub upcoming_count:  usize,
  pub today_active:    bool,
  pub upcoming_active: bool,
  pub lists:           Vec<ListEntry>,
  pub tags:            Vec<TagPill>
}

impl SidebarView {
  pub fn today_action() -> Action {
    Action::SetView {
      view: View::Today
    }
  }

  pub fn upcoming_action() -> Action {
    Action::SetView {
      view: View::Upcoming
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
  pub id:     String,
  pub name:   String,
  pub color:  String,
  /// Incomplete tasks filed under the list.
  pub count:  usize,
  pub active: bool,
  pub action: Action
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPill {
  pub text:  String,
  pub color: &'static str
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
  pub title:         String,
  pub count:         usize,
  pub rows:          Vec<TaskRow>,
  /// Set when no task matches.
  pub empty_message: Option<&'static str>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
  pub id:            String,
  pub title:         String,
  pub completed:     bool,
  pub selected:      bool,
  pub badges:        Vec<Badge>,
  pub toggle_action: Action,
  pub select_action: Action
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
  /// Due date as `DD-MM-YY`.
  Due(String),
  Subtasks(usize),
  List {
    name:  String,
    color: String
  }
}

impl Badge {
  pub fn label(&self) -> String {
    match self {
      | Self::Due(date) => date.clone(),
      | Self::Subtasks(count) => {
        format!("{count} Subtasks")
      }
      | Self::List { name, .. } => {
        name.clone()
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
  Placeholder(&'static str),
  Editor(TaskEditor)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEditor {
  pub task_id:      String,
  pub title:        String,
  pub description:  String,
  /// "None" first (empty id), then each list in registry order.
  pub list_options: Vec<ListOption>,
  /// `YYYY-MM-DD`, or empty.
  pub due:          String,
  pub tags:         Vec<TagPill>,
  pub addable_tags: Vec<String>,
  pub subtasks:     Vec<SubtaskRow>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption {
  pub id:       String,
  pub name:     String,
  pub selected: bool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskRow {
  pub index:         usize,
  pub text:          String,
  pub done:          bool,
  pub toggle_action: Action
}

/// Field values as they sit in the editor when Save is pressed.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct EditorForm {
  pub title:       String,
  pub description: String,
  pub list_id:     String,
  pub due_date:    String
}

impl TaskEditor {
  /// The form prefilled with the task's current values.
  pub fn form(&self) -> EditorForm {
    EditorForm {
      title:       self.title.clone(),
      description: self
        .description
        .clone(),
      list_id:     self
        .list_options
        .iter()
        .find(|option| option.selected)
        .map(|option| option.id.clone())
        .unwrap_or_default(),
      due_date:    self.due.clone()
    }
  }

  pub fn save_action(
    &self,
    form: EditorForm
  ) -> Action {
    Action::UpdateTaskFields {
      id:    self.task_id.clone(),
      patch: TaskPatch {
        title:       Some(form.title),
        description: Some(
          form.description
        ),
        list_id:     Some(form.list_id),
        due_date:    Some(form.due_date)
      }
    }
  }

  pub fn delete_action(&self) -> Action {
    Action::DeleteTask {
      id: self.task_id.clone()
    }
  }

  /// `None` once the task carries every registry tag.
  pub fn add_tag_action(
    &self
  ) -> Option<Action> {
    if self.addable_tags.is_empty() {
      return None;
    }
    Some(Action::AddTagToTask {
      task_id: self.task_id.clone(),
      tag:     None
    })
  }

  pub fn add_subtask_request(
    &self
  ) -> InputRequest {
    InputRequest::Subtask {
      task_id: self.task_id.clone()
    }
  }
}

/// Rebuilds the whole view from state plus the live search text.
pub fn render(
  state: &AppState,
  search: &str,
  today: NaiveDate
) -> ViewModel {
  ViewModel {
    sidebar:   render_sidebar(
      state, today
    ),
    task_list: render_task_list(
      state, search, today
    ),
    detail:    render_detail(state)
  }
}

pub fn render_sidebar(
  state: &AppState,
  today: NaiveDate
) -> SidebarView {
  let lists = state
    .lists
    .iter()
    .map(|list| {
      ListEntry {
        id:     list.id.clone(),
        name:   list.name.clone(),
        color:  list.color.clone(),
        count:
          filter::count_incomplete_in_list(
            state, &list.id
          ),
        active: state
          .current_view
          .list_id()
          == Some(list.id.as_str()),
        action: Action::SetView {
          view: View::List(
            list.id.clone()
          )
        }
      }
    })
    .collect();

  SidebarView {
    today_count: filter::count_incomplete_today(
      state, today
    ),
    upcoming_count:
      filter::count_incomplete_upcoming(
        state, today
      ),
    today_active: state.current_view
      == View::Today,
    upcoming_active: state.current_view
      == View::Upcoming,
    lists,
    tags: tag_pills(&state.tags)
  }
}

pub fn view_title(
  state: &AppState
) -> String {
  match &state.current_view {
    | View::Today => "Today".to_string(),
    | View::Upcoming => {
      "Upcoming".to_string()
    }
    | View::List(id) => state
      .list(id)
      .map_or_else(
        || FALLBACK_TITLE.to_string(),
        |list| list.name.clone()
      )
  }
}

pub fn render_task_list(
  state: &AppState,
  search: &str,
  today: NaiveDate
) -> TaskListView {
  let rows: Vec<TaskRow> =
    filter::visible_tasks(
      state, search, today
    )
    .into_iter()
    .map(|task| task_row(state, task))
    .collect();

  TaskListView {
    title: view_title(state),
    count: rows.len(),
    empty_message: rows
      .is_empty()
      .then_some(EMPTY_MESSAGE),
    rows
  }
}

fn task_row(
  state: &AppState,
  task: &Task
) -> TaskRow {
  let mut badges = Vec::new();
  if let Some(due) = task.due_date {
    badges.push(Badge::Due(
      format_badge_date(due)
    ));
  }
  if !task.subtasks.is_empty() {
    badges.push(Badge::Subtasks(
      task.subtasks.len()
    ));
  }
  if let Some(list) = task
    .list_id
    .as_deref()
    .and_then(|id| state.list(id))
  {
    badges.push(Badge::List {
      name:  list.name.clone(),
      color: list.color.clone()
    });
  }

  TaskRow {
    id: task.id.clone(),
    title: task.title.clone(),
    completed: task.completed,
    selected: state
      .selected_task_id
      .as_deref()
      == Some(task.id.as_str()),
    badges,
    toggle_action:
      Action::ToggleTaskCompletion {
        id: task.id.clone()
      },
    select_action: Action::SelectTask {
      id: task.id.clone()
    }
  }
}

pub fn render_detail(
  state: &AppState
) -> DetailView {
  let Some(task) = state.selected_task()
  else {
    return DetailView::Placeholder(
      DETAIL_PLACEHOLDER
    );
  };

  let resolved_list = task
    .list_id
    .as_deref()
    .and_then(|id| state.list(id));
  let mut list_options =
    vec![ListOption {
      id:       String::new(),
      name:     "None".to_string(),
      selected: resolved_list.is_none()
    }];
  list_options.extend(
    state.lists.iter().map(|list| {
      ListOption {
        id:       list.id.clone(),
        name:     list.name.clone(),
        selected: resolved_list
          .is_some_and(|chosen| {
            chosen.id == list.id
          })
      }
    })
  );

  DetailView::Editor(TaskEditor {
    task_id: task.id.clone(),
    title: task.title.clone(),
    description: task
      .description
      .clone(),
    list_options,
    due: task
      .due_date
      .map(|due| {
        due
          .format(DUE_DATE_FORMAT)
          .to_string()
      })
      .unwrap_or_default(),
    tags: tag_pills(&task.tags),
    addable_tags: addable_tags(
      state, task
    )
    .into_iter()
    .map(str::to_string)
    .collect(),
    subtasks: task
      .subtasks
      .iter()
      .enumerate()
      .map(|(index, subtask)| {
        SubtaskRow {
          index,
          text: subtask.text.clone(),
          done: subtask.done,
          toggle_action:
            Action::ToggleSubtask {
              task_id: task.id.clone(),
              index
            }
        }
      })
      .collect()
  })
}

fn tag_pills(
  tags: &[String]
) -> Vec<TagPill> {
  tags
    .iter()
    .enumerate()
    .map(|(index, text)| TagPill {
      text:  text.clone(),
      color: tag_color(index)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::commands::{
    self,
    add_list,
    add_subtask,
    add_task,
    select_task
  };
  use crate::state::TAG_COLORS;
  use crate::task::Subtask;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(
      2026, 10, 19
    )
    .unwrap()
  }

  fn editor(view: &ViewModel) -> &TaskEditor {
    match &view.detail {
      | DetailView::Editor(editor) => {
        editor
      }
      | DetailView::Placeholder(text) => {
        panic!("expected editor, got {text}")
      }
    }
  }

  #[test]
  fn default_state_renders_placeholder_and_empty_list()
  {
    let view = render(
      &AppState::default(),
      "",
      today()
    );

    assert_eq!(
      view.task_list.title,
      "Today"
    );
    assert_eq!(view.task_list.count, 0);
    assert_eq!(
      view.task_list.empty_message,
      Some(EMPTY_MESSAGE)
    );
    assert_eq!(
      view.detail,
      DetailView::Placeholder(
        DETAIL_PLACEHOLDER
      )
    );
    assert!(view.sidebar.today_active);
    assert_eq!(view.sidebar.lists.len(), 2);
    assert_eq!(
      view.sidebar.tags[1].color,
      TAG_COLORS[1]
    );
  }

  #[test]
  fn render_is_idempotent() {
    let mut state = AppState::default();
    add_task(&mut state, "a", today());
    assert_eq!(
      render(&state, "", today()),
      render(&state, "", today())
    );
  }

  #[test]
  fn rows_carry_badges_in_order() {
    let mut state = AppState {
      current_view: View::List(
        "work".to_string()
      ),
      ..AppState::default()
    };
    let id =
      add_task(&mut state, "Report", today())
        .unwrap();
    add_subtask(&mut state, &id, "draft");
    add_subtask(&mut state, &id, "send");

    let view = render(&state, "", today());
    let row = &view.task_list.rows[0];

    assert_eq!(view.task_list.title, "Work");
    assert_eq!(
      row.badges,
      vec![
        Badge::Due("19-10-26".to_string()),
        Badge::Subtasks(2),
        Badge::List {
          name:  "Work".to_string(),
          color: "#22d3ee".to_string()
        },
      ]
    );
    assert_eq!(
      row.badges[1].label(),
      "2 Subtasks"
    );
  }

  #[test]
  fn dangling_list_reference_omits_badge_and_falls_back_in_title()
  {
    let mut state = AppState::default();
    let list_id =
      add_list(&mut state, "Errands")
        .unwrap();
    commands::set_view(
      &mut state,
      View::List(list_id.clone())
    );
    add_task(&mut state, "Post", today())
      .unwrap();
    commands::delete_list(
      &mut state, &list_id
    );

    let view = render(&state, "", today());
    assert_eq!(
      view.task_list.title,
      FALLBACK_TITLE
    );
    assert_eq!(
      view.task_list.rows[0].badges,
      vec![Badge::Due(
        "19-10-26".to_string()
      )]
    );
  }

  #[test]
  fn sidebar_counts_skip_completed_tasks()
  {
    let mut state = AppState::default();
    let done =
      add_task(&mut state, "done", today())
        .unwrap();
    add_task(&mut state, "open", today());
    commands::toggle_task_completion(
      &mut state, &done
    );

    let sidebar =
      render_sidebar(&state, today());
    assert_eq!(sidebar.today_count, 1);
    assert_eq!(sidebar.upcoming_count, 1);
  }

  #[test]
  fn editor_reflects_selected_task() {
    let mut state = AppState::default();
    let id =
      add_task(&mut state, "Plan", today())
        .unwrap();
    select_task(&mut state, &id);
    commands::add_tag_to_task(
      &mut state,
      &id,
      Some("Tag 2")
    );
    state.task_mut(&id).unwrap().subtasks =
      vec![Subtask {
        text: "one".to_string(),
        done: true
      }];

    let view = render(&state, "", today());
    let editor = editor(&view);

    assert!(view.task_list.rows[0].selected);
    assert_eq!(editor.due, "2026-10-19");
    assert!(editor.list_options[0].selected);
    assert_eq!(
      editor.addable_tags,
      vec!["Tag 1"]
    );
    assert_eq!(
      editor.tags[0].color,
      TAG_COLORS[0]
    );
    assert_eq!(
      editor.subtasks[0].toggle_action,
      Action::ToggleSubtask {
        task_id: id.clone(),
        index:   0
      }
    );
    assert!(editor.add_tag_action().is_some());
  }

  #[test]
  fn saving_the_form_updates_the_task() {
    let mut state = AppState::default();
    let id =
      add_task(&mut state, "Plan", today())
        .unwrap();
    select_task(&mut state, &id);

    let view = render(&state, "", today());
    let editor = editor(&view);
    let form = EditorForm {
      title: "Plan trip".to_string(),
      list_id: "personal".to_string(),
      due_date: String::new(),
      ..editor.form()
    };
    commands::apply(
      &mut state,
      editor.save_action(form),
      today()
    );

    let task = state.task(&id).unwrap();
    assert_eq!(task.title, "Plan trip");
    assert_eq!(
      task.list_id.as_deref(),
      Some("personal")
    );
    assert_eq!(task.due_date, None);

    commands::apply(
      &mut state,
      editor.delete_action(),
      today()
    );
    assert!(state.tasks.is_empty());
    assert_eq!(
      render_detail(&state),
      DetailView::Placeholder(
        DETAIL_PLACEHOLDER
      )
    );
  }
}
