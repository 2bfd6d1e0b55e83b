use ticklist_model::{
  KeyValueStore,
  StorageError
};
use web_sys::Storage;

/// `window.localStorage` as a key-value backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
  fn storage(
    key: &str
  ) -> Result<Storage, String> {
    web_sys::window()
      .ok_or_else(|| {
        "no window".to_string()
      })?
      .local_storage()
      .map_err(|err| format!("{err:?}"))?
      .ok_or_else(|| {
        format!(
          "localStorage is disabled \
           (key {key})"
        )
      })
  }
}

impl KeyValueStore for LocalStore {
  fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    let storage = Self::storage(key)
      .map_err(|reason| {
        StorageError::Read {
          key: key.to_string(),
          reason
        }
      })?;
    storage.get_item(key).map_err(
      |err| StorageError::Read {
        key:    key.to_string(),
        reason: format!("{err:?}")
      }
    )
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    let storage = Self::storage(key)
      .map_err(|reason| {
        StorageError::Write {
          key: key.to_string(),
          reason
        }
      })?;
    storage.set_item(key, value).map_err(
      |err| StorageError::Write {
        key:    key.to_string(),
        reason: format!("{err:?}")
      }
    )
  }
}
