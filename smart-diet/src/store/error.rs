//! Store-related errors.

use thiserror::Error;

/// Errors from the underlying key-value storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend rejected the operation (quota, IO, permissions).
    #[error("storage backend: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_display_carries_detail() {
        let err = StoreError::Backend("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }
}
