/// Display theme, persisted under its own storage key and independent of
/// the task state.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub fn from_storage(
    raw: Option<&str>
  ) -> Self {
    match raw.map(str::trim) {
      | Some("dark") => Self::Dark,
      | _ => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  /// Value of the document `data-theme` attribute.
  pub fn as_attribute(
    self
  ) -> &'static str {
    self.storage_value()
  }

  pub fn toggle(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "Dark mode",
      | Self::Dark => "Light mode"
    }
  }
}
