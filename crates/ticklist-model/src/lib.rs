//! Domain model for the ticklist task manager.
//!
//! Everything in this crate is free of platform I/O so that the browser
//! front-end and the native host share one implementation of the state
//! rules. Front-ends supply a [`storage::KeyValueStore`] and translate
//! user gestures into [`commands::Action`]s.

pub mod commands;
pub mod error;
pub mod filter;
pub mod input;
pub mod state;
pub mod storage;
pub mod task;
pub mod theme;
pub mod view;

pub use commands::{
  Action,
  Outcome,
  TaskPatch
};
pub use error::StorageError;
pub use input::InputRequest;
pub use state::{
  AppState,
  Store
};
pub use storage::{
  KeyValueStore,
  MemoryStore
};
pub use task::{
  Subtask,
  Task,
  TaskList,
  View
};
pub use theme::Theme;
pub use view::ViewModel;
