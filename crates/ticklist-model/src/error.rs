use thiserror::Error;

/// Failures of the key-value backend behind the persistence adapter.
///
/// Reads are recovered locally by falling back to defaults; writes and
/// encoding failures propagate to the caller of the mutating operation.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("failed reading key {key}: {reason}")]
  Read {
    key:    String,
    reason: String
  },
  #[error("failed writing key {key}: {reason}")]
  Write {
    key:    String,
    reason: String
  },
  #[error("failed encoding state: {0}")]
  Encode(#[from] serde_json::Error)
}
