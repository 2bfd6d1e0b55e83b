use crate::commands::Action;

/// Text the core needs from the user before it can build an action.
/// Front-ends decide how to collect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRequest {
  TaskTitle,
  ListName,
  TagName,
  Subtask {
    task_id: String
  }
}

impl InputRequest {
  pub fn label(&self) -> &'static str {
    match self {
      | Self::TaskTitle => "Task name:",
      | Self::ListName => "List name:",
      | Self::TagName => "Tag name:",
      | Self::Subtask { .. } => {
        "Subtask name:"
      }
    }
  }

  /// Turns the collected text into an action; blank text cancels.
  pub fn respond(
    &self,
    text: &str
  ) -> Option<Action> {
    let text = text.trim();
    if text.is_empty() {
      return None;
    }
    let text = text.to_string();
    Some(match self {
      | Self::TaskTitle => {
        Action::AddTask { title: text }
      }
      | Self::ListName => {
        Action::AddList { name: text }
      }
      | Self::TagName => {
        Action::AddTag { name: text }
      }
      | Self::Subtask { task_id } => {
        Action::AddSubtask {
          task_id: task_id.clone(),
          text
        }
      }
    })
  }
}
