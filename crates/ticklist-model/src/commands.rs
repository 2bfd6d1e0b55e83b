//! State transitions. Each operation mutates an [`AppState`] in place and
//! reports whether anything changed; invalid input is a silent no-op.
//! Persisting and re-rendering is the caller's job (see
//! [`crate::state::Store::apply`]).

use chrono::NaiveDate;
use tracing::{
  debug,
  info
};

use crate::state::AppState;
use crate::task::{
  Subtask,
  Task,
  TaskList,
  View,
  new_id,
  parse_due_date
};

/// Field edits from the detail form. `None` leaves a field untouched.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  /// Empty string clears the list.
  pub list_id:     Option<String>,
  /// `YYYY-MM-DD`; empty string clears the due date.
  pub due_date:    Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  AddTask {
    title: String
  },
  ToggleTaskCompletion {
    id: String
  },
  UpdateTaskFields {
    id:    String,
    patch: TaskPatch
  },
  DeleteTask {
    id: String
  },
  SelectTask {
    id: String
  },
  AddSubtask {
    task_id: String,
    text:    String
  },
  ToggleSubtask {
    task_id: String,
    index:   usize
  },
  /// Adds `tag`, or the first registry tag the task lacks.
  AddTagToTask {
    task_id: String,
    tag:     Option<String>
  },
  AddList {
    name: String
  },
  DeleteList {
    id: String
  },
  AddTag {
    name: String
  },
  RemoveTag {
    name: String
  },
  SetView {
    view: View
  }
}

impl Action {
  pub fn name(&self) -> &'static str {
    match self {
      | Self::AddTask { .. } => {
        "add_task"
      }
      | Self::ToggleTaskCompletion {
        ..
      } => "toggle_task_completion",
      | Self::UpdateTaskFields {
        ..
      } => "update_task_fields",
      | Self::DeleteTask { .. } => {
        "delete_task"
      }
      | Self::SelectTask { .. } => {
        "select_task"
      }
      | Self::AddSubtask { .. } => {
        "add_subtask"
      }
      | Self::ToggleSubtask { .. } => {
        "toggle_subtask"
      }
      | Self::AddTagToTask { .. } => {
        "add_tag_to_task"
      }
      | Self::AddList { .. } => {
        "add_list"
      }
      | Self::DeleteList { .. } => {
        "delete_list"
      }
      | Self::AddTag { .. } => "add_tag",
      | Self::RemoveTag { .. } => {
        "remove_tag"
      }
      | Self::SetView { .. } => {
        "set_view"
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Unchanged,
  Changed,
  /// A task or list was created with this id.
  Created(String)
}

impl Outcome {
  pub fn is_changed(&self) -> bool {
    !matches!(self, Self::Unchanged)
  }

  fn from_changed(changed: bool) -> Self {
    if changed {
      Self::Changed
    } else {
      Self::Unchanged
    }
  }
}

/// Dispatches one action against the state.
pub fn apply(
  state: &mut AppState,
  action: Action,
  today: NaiveDate
) -> Outcome {
  let name = action.name();
  let outcome = match action {
    | Action::AddTask { title } => {
      add_task(state, &title, today)
        .map_or(
          Outcome::Unchanged,
          Outcome::Created
        )
    }
    | Action::ToggleTaskCompletion {
      id
    } => Outcome::from_changed(
      toggle_task_completion(state, &id)
    ),
    | Action::UpdateTaskFields {
      id,
      patch
    } => Outcome::from_changed(
      update_task_fields(
        state, &id, patch
      )
    ),
    | Action::DeleteTask { id } => {
      Outcome::from_changed(
        delete_task(state, &id)
      )
    }
    | Action::SelectTask { id } => {
      Outcome::from_changed(
        select_task(state, &id)
      )
    }
    | Action::AddSubtask {
      task_id,
      text
    } => Outcome::from_changed(
      add_subtask(state, &task_id, &text)
    ),
    | Action::ToggleSubtask {
      task_id,
      index
    } => Outcome::from_changed(
      toggle_subtask(
        state, &task_id, index
      )
    ),
    | Action::AddTagToTask {
      task_id,
      tag
    } => Outcome::from_changed(
      add_tag_to_task(
        state,
        &task_id,
        tag.as_deref()
      )
    ),
    | Action::AddList { name } => {
      add_list(state, &name).map_or(
        Outcome::Unchanged,
        Outcome::Created
      )
    }
    | Action::DeleteList { id } => {
      Outcome::from_changed(
        delete_list(state, &id)
      )
    }
    | Action::AddTag { name } => {
      Outcome::from_changed(add_tag(
        state, &name
      ))
    }
    | Action::RemoveTag { name } => {
      Outcome::from_changed(
        remove_tag(state, &name)
      )
    }
    | Action::SetView { view } => {
      Outcome::from_changed(set_view(
        state, view
      ))
    }
  };
  debug!(
    action = name,
    ?outcome,
    "applied action"
  );
  outcome
}

/// Creates a task due today, filed under the current list view if any.
/// Returns the new id; a blank title is rejected.
pub fn add_task(
  state: &mut AppState,
  title: &str,
  today: NaiveDate
) -> Option<String> {
  let title = title.trim();
  if title.is_empty() {
    return None;
  }
  let list_id = state
    .current_view
    .list_id()
    .map(str::to_string);
  let task = Task::new(
    title.to_string(),
    list_id,
    Some(today)
  );
  let id = task.id.clone();
  info!(
    id = %id,
    list = ?task.list_id,
    "added task"
  );
  state.tasks.push(task);
  Some(id)
}

pub fn toggle_task_completion(
  state: &mut AppState,
  id: &str
) -> bool {
  let Some(task) = state.task_mut(id)
  else {
    return false;
  };
  task.completed = !task.completed;
  true
}

pub fn update_task_fields(
  state: &mut AppState,
  id: &str,
  patch: TaskPatch
) -> bool {
  let Some(task) = state.task_mut(id)
  else {
    return false;
  };
  let before = task.clone();

  if let Some(title) = patch.title {
    let title = title.trim();
    if !title.is_empty() {
      task.title = title.to_string();
    }
  }
  if let Some(description) =
    patch.description
  {
    task.description = description;
  }
  if let Some(list_id) = patch.list_id
  {
    task.list_id = non_empty(list_id);
  }
  if let Some(raw) = patch.due_date {
    if raw.trim().is_empty() {
      task.due_date = None;
    } else if let Some(due) =
      parse_due_date(&raw)
    {
      task.due_date = Some(due);
    } else {
      debug!(
        value = %raw,
        "keeping previous due date"
      );
    }
  }

  *task != before
}

/// Removes a task, clearing the selection if it pointed at it.
pub fn delete_task(
  state: &mut AppState,
  id: &str
) -> bool {
  let before = state.tasks.len();
  state
    .tasks
    .retain(|task| task.id != id);
  if state.tasks.len() == before {
    return false;
  }
  if state.selected_task_id.as_deref()
    == Some(id)
  {
    state.selected_task_id = None;
  }
  info!(id, "deleted task");
  true
}

pub fn select_task(
  state: &mut AppState,
  id: &str
) -> bool {
  if state.task(id).is_none()
    || state.selected_task_id.as_deref()
      == Some(id)
  {
    return false;
  }
  state.selected_task_id =
    Some(id.to_string());
  true
}

pub fn add_subtask(
  state: &mut AppState,
  task_id: &str,
  text: &str
) -> bool {
  let text = text.trim();
  if text.is_empty() {
    return false;
  }
  let Some(task) =
    state.task_mut(task_id)
  else {
    return false;
  };
  task.subtasks.push(Subtask {
    text: text.to_string(),
    done: false
  });
  true
}

pub fn toggle_subtask(
  state: &mut AppState,
  task_id: &str,
  index: usize
) -> bool {
  let Some(subtask) = state
    .task_mut(task_id)
    .and_then(|task| {
      task.subtasks.get_mut(index)
    })
  else {
    return false;
  };
  subtask.done = !subtask.done;
  true
}

/// Registry tags the task does not carry yet, in registry order.
pub fn addable_tags<'a>(
  state: &'a AppState,
  task: &Task
) -> Vec<&'a str> {
  state
    .tags
    .iter()
    .filter(|tag| !task.has_tag(tag))
    .map(String::as_str)
    .collect()
}

pub fn add_tag_to_task(
  state: &mut AppState,
  task_id: &str,
  tag: Option<&str>
) -> bool {
  let Some(task) = state.task(task_id)
  else {
    return false;
  };
  let available =
    addable_tags(state, task);
  let chosen = match tag {
    | Some(wanted) => available
      .into_iter()
      .find(|tag| *tag == wanted),
    | None => {
      available.into_iter().next()
    }
  }
  .map(str::to_string);

  let Some(chosen) = chosen else {
    return false;
  };
  match state.task_mut(task_id) {
    | Some(task) => {
      task.tags.push(chosen);
      true
    }
    | None => false
  }
}

pub fn add_list(
  state: &mut AppState,
  name: &str
) -> Option<String> {
  let name = name.trim();
  if name.is_empty() {
    return None;
  }
  let list = TaskList {
    id:    new_id(),
    name:  name.to_string(),
    color: state
      .next_list_color()
      .to_string()
  };
  let id = list.id.clone();
  info!(
    id = %id,
    color = %list.color,
    "added list"
  );
  state.lists.push(list);
  Some(id)
}

/// Drops a list from the registry. Tasks keep their reference, which
/// then resolves to "no list".
pub fn delete_list(
  state: &mut AppState,
  id: &str
) -> bool {
  let before = state.lists.len();
  state
    .lists
    .retain(|list| list.id != id);
  state.lists.len() != before
}

pub fn add_tag(
  state: &mut AppState,
  name: &str
) -> bool {
  let name = name.trim();
  if name.is_empty()
    || state.has_tag(name)
  {
    return false;
  }
  state.tags.push(name.to_string());
  true
}

/// Drops a tag from the registry; tasks keep their copy of the text.
pub fn remove_tag(
  state: &mut AppState,
  name: &str
) -> bool {
  let before = state.tags.len();
  state.tags.retain(|tag| tag != name);
  state.tags.len() != before
}

pub fn set_view(
  state: &mut AppState,
  view: View
) -> bool {
  if state.current_view == view {
    return false;
  }
  state.current_view = view;
  true
}

fn non_empty(
  value: String
) -> Option<String> {
  if value.trim().is_empty() {
    None
  } else {
    Some(value)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::state::LIST_COLORS;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(
      2026, 10, 19
    )
    .unwrap()
  }

  fn state_with_task() -> (AppState, String)
  {
    let mut state = AppState::default();
    let id = add_task(
      &mut state,
      "Buy milk",
      today()
    )
    .unwrap();
    (state, id)
  }

  #[test]
  fn blank_titles_are_rejected() {
    let mut state = AppState::default();
    assert_eq!(
      apply(
        &mut state,
        Action::AddTask {
          title: String::new()
        },
        today()
      ),
      Outcome::Unchanged
    );
    assert_eq!(
      apply(
        &mut state,
        Action::AddTask {
          title: "   ".to_string()
        },
        today()
      ),
      Outcome::Unchanged
    );
    assert!(state.tasks.is_empty());
  }

  #[test]
  fn add_task_files_under_current_list_view()
  {
    let mut state = AppState {
      current_view: View::List(
        "work".to_string()
      ),
      ..AppState::default()
    };
    let id = add_task(
      &mut state,
      "  Buy milk ",
      today()
    )
    .unwrap();

    let task = state.task(&id).unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(
      task.list_id.as_deref(),
      Some("work")
    );
    assert_eq!(
      task.due_date,
      Some(today())
    );
    assert!(!task.completed);
    assert!(task.tags.is_empty());
    assert!(task.subtasks.is_empty());
  }

  #[test]
  fn add_task_in_date_view_has_no_list()
  {
    let (state, id) = state_with_task();
    assert_eq!(
      state.task(&id).unwrap().list_id,
      None
    );
  }

  #[test]
  fn task_ids_are_unique() {
    let mut state = AppState::default();
    let a =
      add_task(&mut state, "a", today())
        .unwrap();
    let b =
      add_task(&mut state, "b", today())
        .unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn update_keeps_title_when_blank_and_normalizes_empty_strings()
  {
    let (mut state, id) =
      state_with_task();
    state
      .task_mut(&id)
      .unwrap()
      .list_id = Some("work".to_string());

    let changed = update_task_fields(
      &mut state,
      &id,
      TaskPatch {
        title:       Some(
          "  ".to_string()
        ),
        description: Some(
          "2 litres".to_string()
        ),
        list_id:     Some(String::new()),
        due_date:    Some(String::new())
      }
    );

    assert!(changed);
    let task = state.task(&id).unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(
      task.description,
      "2 litres"
    );
    assert_eq!(task.list_id, None);
    assert_eq!(task.due_date, None);
  }

  #[test]
  fn update_parses_due_date_and_keeps_it_when_invalid()
  {
    let (mut state, id) =
      state_with_task();
    update_task_fields(
      &mut state,
      &id,
      TaskPatch {
        due_date: Some(
          "2026-12-24".to_string()
        ),
        ..TaskPatch::default()
      }
    );
    let expected =
      NaiveDate::from_ymd_opt(
        2026, 12, 24
      );
    assert_eq!(
      state.task(&id).unwrap().due_date,
      expected
    );

    let changed = update_task_fields(
      &mut state,
      &id,
      TaskPatch {
        due_date: Some(
          "24/12/2026".to_string()
        ),
        ..TaskPatch::default()
      }
    );
    assert!(!changed);
    assert_eq!(
      state.task(&id).unwrap().due_date,
      expected
    );
  }

  #[test]
  fn deleting_selected_task_clears_selection()
  {
    let (mut state, id) =
      state_with_task();
    assert!(select_task(&mut state, &id));
    assert!(delete_task(&mut state, &id));
    assert!(state.tasks.is_empty());
    assert_eq!(
      state.selected_task_id,
      None
    );
  }

  #[test]
  fn deleting_other_task_keeps_selection()
  {
    let (mut state, id) =
      state_with_task();
    let other =
      add_task(&mut state, "x", today())
        .unwrap();
    select_task(&mut state, &id);
    delete_task(&mut state, &other);
    assert_eq!(
      state.selected_task_id,
      Some(id)
    );
  }

  #[test]
  fn selecting_unknown_task_is_ignored()
  {
    let mut state = AppState::default();
    assert!(!select_task(
      &mut state, "nope"
    ));
    assert_eq!(
      state.selected_task_id,
      None
    );
  }

  #[test]
  fn toggle_subtask_flips_only_that_subtask()
  {
    let (mut state, id) =
      state_with_task();
    for text in ["one", "two", "three"] {
      assert!(add_subtask(
        &mut state, &id, text
      ));
    }
    let before =
      state.task(&id).unwrap().clone();

    assert!(toggle_subtask(
      &mut state, &id, 1
    ));

    let after = state.task(&id).unwrap();
    assert!(after.subtasks[1].done);
    assert_eq!(
      after.subtasks[0],
      before.subtasks[0]
    );
    assert_eq!(
      after.subtasks[2],
      before.subtasks[2]
    );
    assert_eq!(after.title, before.title);
    assert_eq!(
      after.completed,
      before.completed
    );
  }

  #[test]
  fn toggle_subtask_out_of_bounds_is_ignored()
  {
    let (mut state, id) =
      state_with_task();
    assert!(!toggle_subtask(
      &mut state, &id, 0
    ));
  }

  #[test]
  fn blank_subtask_text_is_rejected() {
    let (mut state, id) =
      state_with_task();
    assert!(!add_subtask(
      &mut state, &id, " "
    ));
    assert!(
      state
        .task(&id)
        .unwrap()
        .subtasks
        .is_empty()
    );
  }

  #[test]
  fn add_tag_to_task_takes_first_missing_registry_tag()
  {
    let (mut state, id) =
      state_with_task();
    assert!(add_tag_to_task(
      &mut state, &id, None
    ));
    assert!(add_tag_to_task(
      &mut state, &id, None
    ));
    assert!(!add_tag_to_task(
      &mut state, &id, None
    ));
    assert_eq!(
      state.task(&id).unwrap().tags,
      vec!["Tag 1", "Tag 2"]
    );
  }

  #[test]
  fn add_tag_to_task_rejects_unregistered_tags()
  {
    let (mut state, id) =
      state_with_task();
    assert!(!add_tag_to_task(
      &mut state,
      &id,
      Some("urgent")
    ));
    assert!(add_tag_to_task(
      &mut state,
      &id,
      Some("Tag 2")
    ));
    assert_eq!(
      state.task(&id).unwrap().tags,
      vec!["Tag 2"]
    );
  }

  #[test]
  fn new_list_color_cycles_through_palette()
  {
    let mut state = AppState::default();
    let id = add_list(
      &mut state, "Errands"
    )
    .unwrap();
    assert_eq!(
      state.list(&id).unwrap().color,
      LIST_COLORS[2 % LIST_COLORS.len()]
    );

    for n in 0..4 {
      add_list(
        &mut state,
        &format!("l{n}")
      );
    }
    assert_eq!(
      state.lists.last().unwrap().color,
      LIST_COLORS[0]
    );
  }

  #[test]
  fn registry_names_must_be_non_empty_and_unique()
  {
    let mut state = AppState::default();
    assert!(add_list(&mut state, "  ")
      .is_none());
    assert!(!add_tag(&mut state, ""));
    assert!(!add_tag(
      &mut state, "Tag 1"
    ));
    assert!(add_tag(
      &mut state, " Urgent "
    ));
    assert_eq!(
      state.tags.last().map(String::as_str),
      Some("Urgent")
    );
  }

  #[test]
  fn removing_registry_entries_leaves_tasks_alone()
  {
    let (mut state, id) =
      state_with_task();
    update_task_fields(
      &mut state,
      &id,
      TaskPatch {
        list_id: Some(
          "work".to_string()
        ),
        ..TaskPatch::default()
      }
    );
    add_tag_to_task(
      &mut state,
      &id,
      Some("Tag 1")
    );

    assert!(delete_list(
      &mut state, "work"
    ));
    assert!(remove_tag(
      &mut state, "Tag 1"
    ));

    let task = state.task(&id).unwrap();
    assert_eq!(
      task.list_id.as_deref(),
      Some("work")
    );
    assert_eq!(task.tags, vec!["Tag 1"]);
    assert!(state.list("work").is_none());
  }

  #[test]
  fn set_view_accepts_any_token() {
    let mut state = AppState::default();
    assert!(set_view(
      &mut state,
      View::parse("removed-list")
    ));
    assert!(!set_view(
      &mut state,
      View::parse("removed-list")
    ));
    assert_eq!(
      state.current_view.as_token(),
      "removed-list"
    );
  }
}
