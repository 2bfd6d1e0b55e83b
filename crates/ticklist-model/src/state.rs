use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info
};

use crate::commands::{
  self,
  Action,
  Outcome
};
use crate::error::StorageError;
use crate::storage::{
  self,
  KeyValueStore
};
use crate::task::{
  Task,
  TaskList,
  View
};
use crate::theme::Theme;
use crate::view::{
  self,
  ViewModel
};

/// Palette new lists cycle through, indexed by the number of lists.
pub const LIST_COLORS: [&str; 6] = [
  "#ef4444", "#22d3ee", "#facc15",
  "#a78bfa", "#34d399", "#f472b6"
];

/// Palette tag pills cycle through, indexed by position.
pub const TAG_COLORS: [&str; 5] = [
  "#b8e6d0", "#f8c4c4", "#fde68a",
  "#c7d2fe", "#fbcfe8"
];

/// The whole persisted model of a session.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
  pub tasks:            Vec<Task>,
  pub lists:            Vec<TaskList>,
  pub tags:             Vec<String>,
  pub current_view:     View,
  pub selected_task_id: Option<String>
}

impl Default for AppState {
  fn default() -> Self {
    Self {
      tasks:            vec![],
      lists:            vec![
        TaskList {
          id:    "personal".to_string(),
          name:  "Personal".to_string(),
          color: LIST_COLORS[0]
            .to_string()
        },
        TaskList {
          id:    "work".to_string(),
          name:  "Work".to_string(),
          color: LIST_COLORS[1]
            .to_string()
        },
      ],
      tags:             vec![
        "Tag 1".to_string(),
        "Tag 2".to_string(),
      ],
      current_view:     View::Today,
      selected_task_id: None
    }
  }
}

impl AppState {
  pub fn task(
    &self,
    id: &str
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn task_mut(
    &mut self,
    id: &str
  ) -> Option<&mut Task> {
    self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
  }

  /// Resolves a list reference; dangling ids resolve to `None`.
  pub fn list(
    &self,
    id: &str
  ) -> Option<&TaskList> {
    self
      .lists
      .iter()
      .find(|list| list.id == id)
  }

  pub fn selected_task(
    &self
  ) -> Option<&Task> {
    self
      .selected_task_id
      .as_deref()
      .and_then(|id| self.task(id))
  }

  pub fn has_tag(
    &self,
    tag: &str
  ) -> bool {
    self.tags.iter().any(|t| t == tag)
  }

  /// Colour the next created list receives.
  pub fn next_list_color(
    &self
  ) -> &'static str {
    LIST_COLORS
      [self.lists.len() % LIST_COLORS.len()]
  }
}

pub fn tag_color(
  index: usize
) -> &'static str {
  TAG_COLORS[index % TAG_COLORS.len()]
}

/// Single owner of the session state and the backend it persists to.
///
/// Every mutation runs against a working copy which is written to the
/// backend before it replaces the committed state, so a failed write
/// leaves the committed state as it was.
#[derive(Debug)]
pub struct Store<S: KeyValueStore> {
  backend: S,
  state:   AppState,
  theme:   Theme
}

impl<S: KeyValueStore> Store<S> {
  #[tracing::instrument(skip(backend))]
  pub fn open(backend: S) -> Self {
    let state = storage::load(&backend);
    let theme =
      storage::load_theme(&backend);
    info!(
      tasks = state.tasks.len(),
      lists = state.lists.len(),
      theme = theme.storage_value(),
      "opened store"
    );
    Self {
      backend,
      state,
      theme
    }
  }

  pub fn state(&self) -> &AppState {
    &self.state
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  pub fn backend(&self) -> &S {
    &self.backend
  }

  pub fn into_backend(self) -> S {
    self.backend
  }

  /// Applies one action, persists, then commits.
  #[tracing::instrument(
    skip(self, action, today),
    fields(action = action.name())
  )]
  pub fn apply(
    &mut self,
    action: Action,
    today: NaiveDate
  ) -> Result<Outcome, StorageError> {
    let mut next = self.state.clone();
    let outcome = commands::apply(
      &mut next, action, today
    );
    if outcome == Outcome::Unchanged {
      debug!("action was a no-op");
      return Ok(outcome);
    }

    storage::save(
      &mut self.backend,
      &next
    )?;
    self.state = next;
    Ok(outcome)
  }

  pub fn toggle_theme(
    &mut self
  ) -> Result<Theme, StorageError> {
    let next = self.theme.toggle();
    storage::save_theme(
      &mut self.backend,
      next
    )?;
    self.theme = next;
    debug!(
      theme = next.storage_value(),
      "toggled theme"
    );
    Ok(next)
  }

  pub fn view(
    &self,
    search: &str,
    today: NaiveDate
  ) -> ViewModel {
    view::render(
      &self.state,
      search,
      today
    )
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::storage::{
    MemoryStore,
    STATE_KEY
  };

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1)
      .unwrap()
  }

  #[test]
  fn applied_actions_are_persisted() {
    let mut store =
      Store::open(MemoryStore::new());
    let outcome = store
      .apply(
        Action::AddTask {
          title: "Buy milk".to_string()
        },
        today()
      )
      .unwrap();

    assert!(matches!(
      outcome,
      Outcome::Created(_)
    ));
    let reopened = Store::open(
      store.into_backend()
    );
    assert_eq!(
      reopened.state().tasks[0].title,
      "Buy milk"
    );
  }

  #[test]
  fn rejected_actions_do_not_write() {
    let mut store =
      Store::open(MemoryStore::new());
    let outcome = store
      .apply(
        Action::AddTask {
          title: "   ".to_string()
        },
        today()
      )
      .unwrap();

    assert_eq!(
      outcome,
      Outcome::Unchanged
    );
    assert_eq!(
      store.backend().raw(STATE_KEY),
      None
    );
  }

  #[test]
  fn failed_write_keeps_committed_state()
  {
    let mut store = Store::open(
      MemoryStore::failing_writes()
    );
    let result = store.apply(
      Action::AddList {
        name: "Errands".to_string()
      },
      today()
    );

    assert!(result.is_err());
    assert_eq!(
      store.state(),
      &AppState::default()
    );
  }

  #[test]
  fn theme_toggle_persists_separately()
  {
    let mut store =
      Store::open(MemoryStore::new());
    assert_eq!(
      store.toggle_theme().unwrap(),
      Theme::Dark
    );

    let reopened = Store::open(
      store.into_backend()
    );
    assert_eq!(
      reopened.theme(),
      Theme::Dark
    );
    assert_eq!(
      reopened.state(),
      &AppState::default()
    );
  }

  #[test]
  fn dangling_selection_resolves_to_none()
  {
    let state = AppState {
      selected_task_id: Some(
        "gone".to_string()
      ),
      ..AppState::default()
    };
    assert!(
      state.selected_task().is_none()
    );
  }
}
