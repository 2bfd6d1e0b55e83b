use std::collections::HashMap;

use serde::Deserialize;
use tracing::{
  debug,
  warn
};

use crate::error::StorageError;
use crate::state::AppState;
use crate::task::{
  Task,
  TaskList,
  View
};
use crate::theme::Theme;

/// Key of the serialized [`AppState`] blob.
pub const STATE_KEY: &str =
  "todo-app-state";
/// Key of the theme preference string.
pub const THEME_KEY: &str = "theme";

/// String key-value backend the state is persisted into (browser
/// `localStorage`, a directory of files, or memory).
pub trait KeyValueStore {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;
}

/// In-memory backend for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  entries:     HashMap<String, String>,
  fail_writes: bool
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entry(
    key: &str,
    value: &str
  ) -> Self {
    let mut store = Self::default();
    store.entries.insert(
      key.to_string(),
      value.to_string()
    );
    store
  }

  /// A backend whose writes always fail, like a full quota.
  pub fn failing_writes() -> Self {
    Self {
      entries:     HashMap::new(),
      fail_writes: true
    }
  }

  pub fn raw(
    &self,
    key: &str
  ) -> Option<&str> {
    self
      .entries
      .get(key)
      .map(String::as_str)
  }
}

impl KeyValueStore for MemoryStore {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    Ok(self.entries.get(key).cloned())
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    if self.fail_writes {
      return Err(StorageError::Write {
        key:    key.to_string(),
        reason: "quota exceeded"
          .to_string()
      });
    }
    self.entries.insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}

/// Top-level fields as they may appear in an older blob. Every field is
/// optional; present ones are laid over the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
  tasks:            Option<Vec<Task>>,
  lists:            Option<Vec<TaskList>>,
  tags:             Option<Vec<String>>,
  current_view:     Option<View>,
  selected_task_id: Option<String>
}

impl StoredState {
  fn overlay(
    self,
    mut base: AppState
  ) -> AppState {
    if let Some(tasks) = self.tasks {
      base.tasks = tasks;
    }
    if let Some(lists) = self.lists {
      base.lists = lists;
    }
    if let Some(tags) = self.tags {
      base.tags = tags;
    }
    if let Some(view) =
      self.current_view
    {
      base.current_view = view;
    }
    base.selected_task_id =
      self.selected_task_id;
    base
  }
}

/// Reads the state blob. A missing key, a failing backend or a blob that
/// does not parse all yield the default state; nothing is surfaced.
#[tracing::instrument(skip(store))]
pub fn load<S: KeyValueStore + ?Sized>(
  store: &S
) -> AppState {
  let raw = match store.get(STATE_KEY) {
    | Ok(Some(raw)) => raw,
    | Ok(None) => {
      debug!(
        "no stored state; using \
         defaults"
      );
      return AppState::default();
    }
    | Err(err) => {
      warn!(
        error = %err,
        "failed reading stored state; \
         using defaults"
      );
      return AppState::default();
    }
  };

  match serde_json::from_str::<
    Option<StoredState>
  >(&raw)
  {
    | Ok(Some(stored)) => {
      let state = stored
        .overlay(AppState::default());
      debug!(
        tasks = state.tasks.len(),
        lists = state.lists.len(),
        view = %state.current_view,
        "loaded stored state"
      );
      state
    }
    | Ok(None) => AppState::default(),
    | Err(err) => {
      warn!(
        error = %err,
        "stored state is corrupt; \
         using defaults"
      );
      AppState::default()
    }
  }
}

/// Writes the whole state blob. Failures propagate.
#[tracing::instrument(skip(store, state), fields(tasks = state.tasks.len()))]
pub fn save<S: KeyValueStore + ?Sized>(
  store: &mut S,
  state: &AppState
) -> Result<(), StorageError> {
  let json =
    serde_json::to_string(state)?;
  store.set(STATE_KEY, &json)
}

pub fn load_theme<
  S: KeyValueStore + ?Sized
>(
  store: &S
) -> Theme {
  match store.get(THEME_KEY) {
    | Ok(raw) => {
      Theme::from_storage(
        raw.as_deref()
      )
    }
    | Err(err) => {
      warn!(
        error = %err,
        "failed reading theme"
      );
      Theme::default()
    }
  }
}

pub fn save_theme<
  S: KeyValueStore + ?Sized
>(
  store: &mut S,
  theme: Theme
) -> Result<(), StorageError> {
  store.set(
    THEME_KEY,
    theme.storage_value()
  )
}
