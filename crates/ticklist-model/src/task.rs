use std::fmt;

use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

pub const VIEW_TODAY: &str = "today";
pub const VIEW_UPCOMING: &str =
  "upcoming";

/// Storage format of due dates.
pub const DUE_DATE_FORMAT: &str =
  "%Y-%m-%d";

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Subtask {
  #[serde(default)]
  pub text: String,
  #[serde(default)]
  pub done: bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:          String,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub completed:   bool,
  #[serde(default)]
  pub list_id:     Option<String>,
  #[serde(
    default,
    with = "due_date_serde"
  )]
  pub due_date:    Option<NaiveDate>,
  #[serde(default)]
  pub tags:        Vec<String>,
  #[serde(default)]
  pub subtasks:    Vec<Subtask>
}

impl Task {
  pub fn new(
    title: String,
    list_id: Option<String>,
    due_date: Option<NaiveDate>
  ) -> Self {
    Self {
      id: new_id(),
      title,
      description: String::new(),
      completed: false,
      list_id,
      due_date,
      tags: vec![],
      subtasks: vec![]
    }
  }

  pub fn has_tag(
    &self,
    tag: &str
  ) -> bool {
    self
      .tags
      .iter()
      .any(|value| value == tag)
  }
}

/// A named, coloured list that tasks may reference by id.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskList {
  pub id:    String,
  pub name:  String,
  pub color: String
}

/// Filter context of the task list: the two date views or a list id.
///
/// Stored as a bare string token so that any id round-trips, including
/// ids of lists that no longer exist.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum View {
  #[default]
  Today,
  Upcoming,
  List(String)
}

impl View {
  pub fn parse(token: &str) -> Self {
    match token {
      | VIEW_TODAY => Self::Today,
      | VIEW_UPCOMING => Self::Upcoming,
      | other => {
        Self::List(other.to_string())
      }
    }
  }

  pub fn as_token(&self) -> &str {
    match self {
      | Self::Today => VIEW_TODAY,
      | Self::Upcoming => VIEW_UPCOMING,
      | Self::List(id) => id
    }
  }

  pub fn list_id(
    &self
  ) -> Option<&str> {
    match self {
      | Self::List(id) => Some(id),
      | _ => None
    }
  }
}

impl From<String> for View {
  fn from(token: String) -> Self {
    Self::parse(&token)
  }
}

impl From<View> for String {
  fn from(view: View) -> Self {
    view.as_token().to_string()
  }
}

impl fmt::Display for View {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_token())
  }
}

pub fn new_id() -> String {
  Uuid::new_v4().simple().to_string()
}

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_due_date(
  raw: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    DUE_DATE_FORMAT
  )
  .ok()
}

/// Badge rendering of a due date (`DD-MM-YY`).
pub fn format_badge_date(
  date: NaiveDate
) -> String {
  date.format("%d-%m-%y").to_string()
}

/// Due dates are written as `YYYY-MM-DD` or `null`. Reading is lenient:
/// an empty or unparsable string becomes "no due date" instead of failing
/// the whole state blob.
pub mod due_date_serde {
  use chrono::NaiveDate;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  use super::{
    DUE_DATE_FORMAT,
    parse_due_date
  };

  pub fn serialize<S>(
    date: &Option<NaiveDate>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match date {
      | Some(value) => serializer
        .serialize_str(
          &value
            .format(DUE_DATE_FORMAT)
            .to_string()
        ),
      | None => {
        serializer.serialize_none()
      }
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      Option::<String>::deserialize(
        deserializer
      )?;
    Ok(raw.and_then(|value| {
      let parsed =
        parse_due_date(&value);
      if parsed.is_none()
        && !value.trim().is_empty()
      {
        tracing::warn!(
          value = %value,
          "ignoring unparsable due date"
        );
      }
      parsed
    }))
  }
}
