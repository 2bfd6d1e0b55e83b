use chrono::{
  DateTime,
  NaiveDate,
  TimeZone,
  Utc
};
use tracing::trace;

use crate::state::AppState;
use crate::task::{
  Task,
  View
};

/// Calendar date of `now` in UTC. Due dates are compared against this,
/// whatever the host time zone.
pub fn calendar_date<Tz: TimeZone>(
  now: &DateTime<Tz>
) -> NaiveDate {
  now.with_timezone(&Utc).date_naive()
}

/// Today's date for filtering and new tasks.
pub fn current_date() -> NaiveDate {
  calendar_date(&Utc::now())
}

/// No due date, or due on `today`.
pub fn is_today(
  task: &Task,
  today: NaiveDate
) -> bool {
  match task.due_date {
    | None => true,
    | Some(due) => due == today
  }
}

/// Due on or after `today`. A task due today is both "today" and
/// "upcoming".
pub fn is_upcoming(
  task: &Task,
  today: NaiveDate
) -> bool {
  task
    .due_date
    .is_some_and(|due| due >= today)
}

/// View membership. Completion never removes a task from a view.
pub fn matches_view(
  task: &Task,
  view: &View,
  today: NaiveDate
) -> bool {
  match view {
    | View::Today => {
      is_today(task, today)
    }
    | View::Upcoming => {
      is_upcoming(task, today)
    }
    | View::List(id) => {
      task.list_id.as_deref()
        == Some(id.as_str())
    }
  }
}

/// Case-insensitive substring match on the title; an empty query
/// matches everything.
pub fn matches_search(
  task: &Task,
  query: &str
) -> bool {
  if query.is_empty() {
    return true;
  }
  task
    .title
    .to_lowercase()
    .contains(&query.to_lowercase())
}

/// Tasks listed under the current view, in insertion order.
pub fn visible_tasks<'a>(
  state: &'a AppState,
  search: &str,
  today: NaiveDate
) -> Vec<&'a Task> {
  let visible: Vec<&Task> = state
    .tasks
    .iter()
    .filter(|task| {
      matches_search(task, search)
    })
    .filter(|task| {
      matches_view(
        task,
        &state.current_view,
        today
      )
    })
    .collect();

  trace!(
    view = %state.current_view,
    search,
    visible = visible.len(),
    total = state.tasks.len(),
    "filtered tasks"
  );
  visible
}

pub fn count_incomplete_today(
  state: &AppState,
  today: NaiveDate
) -> usize {
  state
    .tasks
    .iter()
    .filter(|task| {
      !task.completed
        && is_today(task, today)
    })
    .count()
}

pub fn count_incomplete_upcoming(
  state: &AppState,
  today: NaiveDate
) -> usize {
  state
    .tasks
    .iter()
    .filter(|task| {
      !task.completed
        && is_upcoming(task, today)
    })
    .count()
}

pub fn count_incomplete_in_list(
  state: &AppState,
  list_id: &str
) -> usize {
  state
    .tasks
    .iter()
    .filter(|task| {
      !task.completed
        && task.list_id.as_deref()
          == Some(list_id)
    })
    .count()
}
